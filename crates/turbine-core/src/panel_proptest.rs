#[cfg(test)]
mod proptest_panel {
    use crate::command::*;
    use crate::lifecycle::TurbineState;
    use crate::telemetry::power_output_kw;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10000))]

        // Property: power matches the reference formula over the whole pitch range
        #[test]
        fn power_matches_reference_formula(pitch in 0u16..=90) {
            let expected = (350.0 * (1.0 - f64::from(pitch) / 90.0)).round().max(0.0) as u32;
            prop_assert_eq!(power_output_kw(TurbineState::Running, pitch), expected);
            prop_assert_eq!(power_output_kw(TurbineState::Starting, pitch), expected);
        }

        // Property: power is never negative and never exceeds rated output
        #[test]
        fn power_is_bounded(pitch in 0u16..=90) {
            let power = power_output_kw(TurbineState::Running, pitch);
            prop_assert!(power <= 350);
        }

        // Property: power is monotone non-increasing in pitch
        #[test]
        fn power_decreases_with_pitch(pitch in 0u16..90) {
            let steeper = power_output_kw(TurbineState::Running, pitch + 1);
            let flatter = power_output_kw(TurbineState::Running, pitch);
            prop_assert!(steeper <= flatter);
        }

        // Property: any pitch reads zero outside Running/Starting
        #[test]
        fn power_is_zero_at_rest(pitch in 0u16..=90) {
            prop_assert_eq!(power_output_kw(TurbineState::Stopped, pitch), 0);
            prop_assert_eq!(power_output_kw(TurbineState::Slowing, pitch), 0);
        }

        // Property: in-range commands are accepted exactly while running
        #[test]
        fn in_range_commands_gate_on_state(yaw in 0i32..=360, pitch in 0i32..=90) {
            for (axis, degrees) in [(ControlAxis::Yaw, yaw), (ControlAxis::Pitch, pitch)] {
                prop_assert!(AngleCommand::new(axis, degrees)
                    .validate(TurbineState::Running)
                    .is_ok());
                for state in [TurbineState::Stopped, TurbineState::Starting, TurbineState::Slowing] {
                    let res = AngleCommand::new(axis, degrees).validate(state);
                    let locked = matches!(res, Err(CommandRejection::ControlsLocked { .. }));
                    prop_assert!(locked);
                }
            }
        }

        // Property: out-of-range commands are always rejected while running
        #[test]
        fn out_of_range_always_rejected(over in 1i32..10000, under in 1i32..10000) {
            for axis in [ControlAxis::Yaw, ControlAxis::Pitch] {
                let high = AngleCommand::new(axis, i32::from(axis.max_deg()) + over)
                    .validate(TurbineState::Running);
                let high_rejected = matches!(high, Err(CommandRejection::OutOfRange { .. }));
                prop_assert!(high_rejected);

                let low = AngleCommand::new(axis, -under).validate(TurbineState::Running);
                let low_rejected = matches!(low, Err(CommandRejection::OutOfRange { .. }));
                prop_assert!(low_rejected);
            }
        }
    }
}
