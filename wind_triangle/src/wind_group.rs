use std::str::FromStr;

use nom::{
    Finish, IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, u16},
    combinator::{all_consuming, map_parser, opt, value, verify},
    sequence::preceded,
};
use serde::{Deserialize, Serialize};

use crate::error::{SolverResult, WindTriangleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindGroupDirection {
    Heading(u16),
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindSpeedUnit {
    Knots,
    MetersPerSecond,
    KilometersPerHour,
}

impl WindSpeedUnit {
    const fn suffix(&self) -> &'static str {
        match self {
            WindSpeedUnit::Knots => "KT",
            WindSpeedUnit::MetersPerSecond => "MPS",
            WindSpeedUnit::KilometersPerHour => "KMH",
        }
    }
}

/// Surface wind group of a METAR, e.g. `27015G25KT` or `VRB03KT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindGroup {
    pub direction: WindGroupDirection,
    pub speed: u16,
    pub gust: Option<u16>,
    pub unit: WindSpeedUnit,
}

impl WindGroup {
    pub fn is_calm(&self) -> bool {
        self.speed == 0 && self.gust.is_none()
    }

    /// Direction and speed in degrees/knots, ready for the solver.
    pub fn solver_wind(&self, use_gust: bool) -> SolverResult<(f64, f64)> {
        if self.unit != WindSpeedUnit::Knots {
            return Err(WindTriangleError::UnsupportedUnit(self.unit.suffix()));
        }
        let speed = match (use_gust, self.gust) {
            (true, Some(gust)) => gust,
            _ => self.speed,
        };
        match self.direction {
            WindGroupDirection::Heading(direction) => Ok((f64::from(direction), f64::from(speed))),
            // A variable calm has no drift to correct for.
            WindGroupDirection::Variable if speed == 0 => Ok((0.0, 0.0)),
            WindGroupDirection::Variable => Err(WindTriangleError::VariableWind),
        }
    }
}

impl FromStr for WindGroup {
    type Err = nom::error::Error<String>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(nom_wind_group)
            .parse(s)
            .finish()
            .map(|(_, wind)| wind)
            .map_err(|e| nom::error::Error::new(e.input.to_string(), e.code))
    }
}

/// First wind group in a METAR line. A bare wind group is accepted as well.
pub fn find_wind_group(metar: &str) -> SolverResult<WindGroup> {
    let wind = metar
        .split_whitespace()
        .find_map(|token| token.parse::<WindGroup>().ok());
    match wind {
        Some(wind) => Ok(wind),
        None => Err(WindTriangleError::WindGroupParse(nom::error::Error::new(
            metar.to_string(),
            nom::error::ErrorKind::Fail,
        ))),
    }
}

pub fn nom_wind_group(input: &str) -> IResult<&str, WindGroup> {
    (
        nom_wind_direction,
        nom_speed_digits,
        opt(preceded(char('G'), nom_speed_digits)),
        nom_speed_unit,
    )
        .map(|(direction, speed, gust, unit)| WindGroup {
            direction,
            speed,
            gust,
            unit,
        })
        .parse(input)
}

fn nom_wind_direction(input: &str) -> IResult<&str, WindGroupDirection> {
    alt((
        value(WindGroupDirection::Variable, tag("VRB")),
        verify(
            map_parser(take_while_m_n(3, 3, |c: char| c.is_ascii_digit()), u16),
            |direction: &u16| *direction <= 360,
        )
        .map(WindGroupDirection::Heading),
    ))
    .parse(input)
}

fn nom_speed_digits(input: &str) -> IResult<&str, u16> {
    map_parser(
        take_while_m_n(2, 3, |c: char| c.is_ascii_digit()),
        all_consuming(u16),
    )
    .parse(input)
}

fn nom_speed_unit(input: &str) -> IResult<&str, WindSpeedUnit> {
    alt((
        value(WindSpeedUnit::Knots, tag("KT")),
        value(WindSpeedUnit::MetersPerSecond, tag("MPS")),
        value(WindSpeedUnit::KilometersPerHour, tag("KMH")),
    ))
    .parse(input)
}
