use crate::lifecycle::TurbineState;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub struct Unchecked;

#[derive(Debug, Clone, Copy)]
pub struct Checked;

/// The two operator-adjustable angles on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAxis {
    Yaw,
    Pitch,
}

impl ControlAxis {
    pub fn min_deg(&self) -> u16 {
        0
    }

    pub fn max_deg(&self) -> u16 {
        match self {
            Self::Yaw => 360,
            Self::Pitch => 90,
        }
    }
}

impl fmt::Display for ControlAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaw => f.write_str("yaw"),
            Self::Pitch => f.write_str("pitch"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandRejection {
    #[error("{axis} of {requested}\u{b0} is outside {min}..={max}\u{b0}")]
    OutOfRange {
        axis: ControlAxis,
        requested: i32,
        min: u16,
        max: u16,
    },
    #[error("{axis} control is locked while turbine is {state}")]
    ControlsLocked {
        axis: ControlAxis,
        state: TurbineState,
    },
}

/// An angle request from the operator.
///
/// Follows the validate-then-apply pattern: an `Unchecked` command carries an
/// arbitrary request, and only `validate` can turn it into a `Checked` one
/// that the panel will accept. Validation checks the lifecycle gate first
/// (angles move only while running) and the axis range second.
#[derive(Debug, Clone, Copy)]
pub struct AngleCommand<Stage = Unchecked> {
    axis: ControlAxis,
    degrees: i32,
    _stage: PhantomData<Stage>,
}

impl AngleCommand<Unchecked> {
    pub fn new(axis: ControlAxis, degrees: i32) -> Self {
        Self {
            axis,
            degrees,
            _stage: PhantomData,
        }
    }

    pub fn validate(
        self,
        state: TurbineState,
    ) -> Result<AngleCommand<Checked>, CommandRejection> {
        if !state.accepts_commands() {
            return Err(CommandRejection::ControlsLocked {
                axis: self.axis,
                state,
            });
        }

        let min = self.axis.min_deg();
        let max = self.axis.max_deg();
        if self.degrees < i32::from(min) || self.degrees > i32::from(max) {
            return Err(CommandRejection::OutOfRange {
                axis: self.axis,
                requested: self.degrees,
                min,
                max,
            });
        }

        Ok(AngleCommand {
            axis: self.axis,
            degrees: self.degrees,
            _stage: PhantomData,
        })
    }
}

impl AngleCommand<Checked> {
    pub fn axis(&self) -> ControlAxis {
        self.axis
    }

    pub fn degrees(&self) -> u16 {
        // Range-checked in validate; the value fits.
        self.degrees as u16
    }
}
