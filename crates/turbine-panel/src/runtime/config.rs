use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub show_help: bool,
    pub headless: bool,
    pub run_seconds: Option<u64>,
    pub json_logs: bool,
    pub log_file: Option<PathBuf>,
    pub metrics_addr: Option<String>,
    pub audit_path: Option<PathBuf>,
    pub spin_up: Duration,
    pub spin_down: Duration,
    pub turbine_id: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            show_help: false,
            headless: false,
            run_seconds: None,
            json_logs: false,
            log_file: None,
            metrics_addr: None,
            audit_path: None,
            spin_up: Duration::from_millis(1000),
            spin_down: Duration::from_millis(1000),
            turbine_id: "Wind Turbine #607".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }

    pub fn from_args(args: &[String]) -> Self {
        let mut cfg = RuntimeConfig::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--headless" => {
                    cfg.headless = true;
                }
                "--run-seconds" => {
                    if i + 1 < args.len() {
                        cfg.run_seconds = args[i + 1].parse::<u64>().ok();
                        i += 1;
                    }
                }
                "--json-logs" => {
                    cfg.json_logs = true;
                }
                "--log-file" => {
                    if i + 1 < args.len() {
                        cfg.log_file = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--metrics-addr" => {
                    if i + 1 < args.len() {
                        cfg.metrics_addr = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--audit-log" => {
                    if i + 1 < args.len() {
                        cfg.audit_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--spin-up-ms" => {
                    if i + 1 < args.len() {
                        let ms = args[i + 1].parse().unwrap_or(1000);
                        cfg.spin_up = Duration::from_millis(ms);
                        i += 1;
                    }
                }
                "--spin-down-ms" => {
                    if i + 1 < args.len() {
                        let ms = args[i + 1].parse().unwrap_or(1000);
                        cfg.spin_down = Duration::from_millis(ms);
                        i += 1;
                    }
                }
                "--turbine-id" => {
                    if i + 1 < args.len() {
                        cfg.turbine_id = args[i + 1].clone();
                        i += 1;
                    }
                }
                "--help" | "-h" => {
                    cfg.show_help = true;
                    break;
                }
                _ => {}
            }
            i += 1;
        }
        cfg
    }

    pub fn print_help() {
        println!(
            r#"turbine-panel - Wind turbine control panel

USAGE:
    turbine-panel [OPTIONS]

OPTIONS:
    --headless              Run without the terminal dashboard (scripted demo cycle;
                            stops on Ctrl-C or after --run-seconds)
    --run-seconds <SECS>    Run for a fixed duration then exit (headless mode)
    --json-logs             Output logs in JSON format (for log aggregation)
    --log-file <PATH>       Write logs to a file instead of stdout
                            [default in dashboard mode: turbine-panel.log]
    --metrics-addr <ADDR>   Enable Prometheus metrics server on address (e.g., 0.0.0.0:9090)
    --audit-log <PATH>      Enable audit logging to specified JSONL file
    --spin-up-ms <MS>       Spin-up duration before Running [default: 1000]
    --spin-down-ms <MS>     Spin-down duration before Stopped [default: 1000]
    --turbine-id <NAME>     Panel header name [default: Wind Turbine #607]
    -h, --help              Print this help message

KEYS (dashboard mode):
    Space/Enter             Start or stop the turbine
    Left/Right              Adjust yaw (Shift for x10 steps)
    Up/Down                 Adjust blade pitch (Shift for x10 steps)
    q / Esc / Ctrl-C        Quit

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log filter (e.g., RUST_LOG=debug,turbine_panel=trace)

EXAMPLES:
    # Interactive dashboard with metrics
    turbine-panel --metrics-addr 0.0.0.0:9090

    # Short headless run with full observability
    turbine-panel --headless --run-seconds 10 --json-logs --audit-log audit.jsonl
"#
        );
    }
}
