//! Operator commands, one per input line.

use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

use crate::scene::Spherical;

const THETA_RANGE: RangeInclusive<f32> = 10.0..=80.0;
const PHI_RANGE: RangeInclusive<f32> = 0.0..=360.0;
const POWER_RANGE: RangeInclusive<f32> = 0.0..=100.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `move e2e4`
    Move(String),
    /// `camera <theta> <phi> <r>`
    Camera(Spherical),
    /// `light <theta> <phi> <r>`
    Light(Spherical),
    /// `power <0..100>`, a percentage
    Power(f32),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("{command} expects {expected} argument(s), got {got}")]
    WrongArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{name} must be in {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: f32,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match name {
            "move" => {
                let [mv] = arguments::<1>("move", &args)?;
                Ok(Command::Move(mv.to_string()))
            }
            "camera" => Ok(Command::Camera(spherical("camera", &args)?)),
            "light" => Ok(Command::Light(spherical("light", &args)?)),
            "power" => {
                let [value] = arguments::<1>("power", &args)?;
                let value = number(value)?;
                check("power", "[0, 100]", value, POWER_RANGE.contains(&value))?;
                Ok(Command::Power(value))
            }
            "quit" => {
                arguments::<0>("quit", &args)?;
                Ok(Command::Quit)
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn arguments<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::WrongArgumentCount {
        command,
        expected: N,
        got: args.len(),
    })
}

fn number(text: &str) -> Result<f32, CommandError> {
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::NotANumber(text.to_string()))
}

fn check(name: &'static str, range: &'static str, value: f32, ok: bool) -> Result<(), CommandError> {
    if ok {
        Ok(())
    } else {
        Err(CommandError::OutOfRange { name, range, value })
    }
}

/// `<theta> <phi> <r>` with theta in [10, 80], phi in [0, 360] and r > 0.
fn spherical(command: &'static str, args: &[&str]) -> Result<Spherical, CommandError> {
    let [theta, phi, r] = arguments::<3>(command, args)?;
    let (theta, phi, r) = (number(theta)?, number(phi)?, number(r)?);
    check("theta", "[10, 80]", theta, THETA_RANGE.contains(&theta))?;
    check("phi", "[0, 360]", phi, PHI_RANGE.contains(&phi))?;
    check("r", "(0, inf)", r, r > 0.0)?;
    Ok(Spherical::new(theta, phi, r))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
