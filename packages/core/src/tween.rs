use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

/// An easing curve, named the way GSAP names them (`power3.out`, `none`, ...).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct Ease {
    power: u8,
    direction: Direction,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, AsRefStr, EnumString)]
pub enum Direction {
    #[strum(serialize = "in")]
    In,
    #[strum(serialize = "out")]
    Out,
    #[strum(serialize = "inOut")]
    InOut,
}

impl Ease {
    pub const LINEAR: Self = Self {
        power: 0,
        direction: Direction::Out,
    };
    const MAX_POWER: u8 = 4;

    pub fn power(power: u8, direction: Direction) -> Option<Self> {
        (1..=Self::MAX_POWER)
            .contains(&power)
            .then_some(Self { power, direction })
    }

    pub fn power1_out() -> Self {
        Self {
            power: 1,
            direction: Direction::Out,
        }
    }

    pub fn power3_out() -> Self {
        Self {
            power: 3,
            direction: Direction::Out,
        }
    }

    /// Map linear progress in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let exponent = i32::from(self.power) + 1;

        if self.power == 0 {
            return t;
        }

        match self.direction {
            Direction::In => t.powi(exponent),
            Direction::Out => 1.0 - (1.0 - t).powi(exponent),
            Direction::InOut => {
                if t < 0.5 {
                    (2.0 * t).powi(exponent) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exponent) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.power == 0 {
            f.write_str("none")
        } else {
            write!(f, "power{}.{}", self.power, self.direction)
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown ease `{0}`")]
pub struct UnknownEase(String);

impl FromStr for Ease {
    type Err = UnknownEase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownEase(s.to_owned());

        if s == "none" || s == "linear" {
            return Ok(Self::LINEAR);
        }

        let (power, direction) = s
            .strip_prefix("power")
            .and_then(|rest| rest.split_once('.'))
            .ok_or_else(unknown)?;
        let power = power.parse().map_err(|_| unknown())?;
        let direction = direction.parse().map_err(|_| unknown())?;

        Self::power(power, direction).ok_or_else(unknown)
    }
}

impl TryFrom<String> for Ease {
    type Error = UnknownEase;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Property {
    Opacity,
    /// Vertical offset in `px`.
    OffsetY,
    /// Height in `rem`.
    Height,
}

impl Property {
    /// The CSS property name and value to apply for `value`.
    pub fn css(self, value: f64) -> (&'static str, String) {
        match self {
            Self::Opacity => ("opacity", format!("{value}")),
            Self::OffsetY => ("transform", format!("translateY({value}px)")),
            Self::Height => ("height", format!("{value}rem")),
        }
    }
}

#[derive(Clone, Default, PartialEq, Debug)]
pub struct Pose(BTreeMap<Property, f64>);

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: Property, value: f64) {
        self.0.insert(property, value);
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        self.0.get(&property).copied()
    }

    /// Overwrite the properties present in `other`.
    pub fn merge(&mut self, other: &Pose) {
        self.0.extend(other.iter());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(property, value)| (*property, *value))
    }
}

/// A time-interpolated change from wherever the target is towards `to`.
#[derive(Clone, PartialEq, Debug)]
pub struct Tween {
    to: Pose,
    duration: f64,
    delay: f64,
    ease: Ease,
}

impl Tween {
    pub fn to(pose: Pose) -> Self {
        Self {
            to: pose,
            duration: 0.0,
            delay: 0.0,
            ease: Ease::LINEAR,
        }
    }

    /// Duration in seconds.
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    /// Start delay in seconds.
    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn target(&self) -> &Pose {
        &self.to
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    pub fn delay_secs(&self) -> f64 {
        self.delay
    }

    pub fn easing(&self) -> Ease {
        self.ease
    }

    /// The pose at linear progress `t`, starting from `from`.
    ///
    /// Properties missing from `from` jump straight to their final value.
    pub fn interpolate(&self, from: &Pose, t: f64) -> Pose {
        let eased = self.ease.apply(t);

        Pose(
            self.to
                .iter()
                .map(|(property, end)| {
                    let value = from
                        .get(property)
                        .map_or(end, |start| start + (end - start) * eased);
                    (property, value)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Ease, Pose, Property, Tween, UnknownEase};

    const EPSILON: f64 = 1e-9;

    fn all_eases() -> Vec<Ease> {
        let mut eases = vec![Ease::LINEAR];

        for power in 1..=4 {
            for direction in [Direction::In, Direction::Out, Direction::InOut] {
                eases.push(Ease::power(power, direction).unwrap());
            }
        }

        eases
    }

    #[test]
    fn endpoints() {
        for ease in all_eases() {
            assert!(ease.apply(0.0).abs() < EPSILON, "{ease}");
            assert!((ease.apply(1.0) - 1.0).abs() < EPSILON, "{ease}");
            assert!((ease.apply(2.0) - 1.0).abs() < EPSILON, "{ease}");
            assert!(ease.apply(-1.0).abs() < EPSILON, "{ease}");
        }
    }

    #[test]
    fn in_out_is_symmetric() {
        let ease = Ease::power(2, Direction::InOut).unwrap();

        assert!((ease.apply(0.5) - 0.5).abs() < EPSILON);
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn power3_out_is_front_loaded() {
        let ease = Ease::power3_out();

        // 1 - 0.5^4
        assert!((ease.apply(0.5) - 0.9375).abs() < EPSILON);
        assert!(ease.apply(0.1) > Ease::power1_out().apply(0.1));
    }

    #[test]
    fn parse_names() {
        for ease in all_eases() {
            assert_eq!(ease.to_string().parse::<Ease>(), Ok(ease));
        }

        assert_eq!("linear".parse::<Ease>(), Ok(Ease::LINEAR));
        assert_eq!("power3.out".parse::<Ease>(), Ok(Ease::power3_out()));
        assert_eq!(
            "power2.inOut".parse::<Ease>(),
            Ok(Ease::power(2, Direction::InOut).unwrap())
        );
    }

    #[test]
    fn reject_unknown() {
        for name in ["power5.out", "power0.in", "power1", "power1.sideways", "elastic"] {
            assert_eq!(
                name.parse::<Ease>(),
                Err(UnknownEase(name.to_owned())),
                "{name}"
            );
        }
    }

    #[test]
    fn css() {
        assert_eq!(Property::Opacity.css(0.5), ("opacity", "0.5".to_owned()));
        assert_eq!(
            Property::OffsetY.css(-6.0),
            ("transform", "translateY(-6px)".to_owned())
        );
        assert_eq!(Property::Height.css(42.0), ("height", "42rem".to_owned()));
    }

    #[test]
    fn interpolate() {
        let from = Pose::new()
            .with(Property::Opacity, 0.0)
            .with(Property::OffsetY, -6.0);
        let tween = Tween::to(
            Pose::new()
                .with(Property::Opacity, 1.0)
                .with(Property::OffsetY, 0.0)
                .with(Property::Height, 10.0),
        )
        .duration(1.0);

        let halfway = tween.interpolate(&from, 0.5);

        assert_eq!(halfway.get(Property::Opacity), Some(0.5));
        assert_eq!(halfway.get(Property::OffsetY), Some(-3.0));
        assert_eq!(halfway.get(Property::Height), Some(10.0));
        assert_eq!(tween.interpolate(&from, 1.0), *tween.target());
    }

    #[test]
    fn merge() {
        let mut pose = Pose::new()
            .with(Property::Opacity, 0.0)
            .with(Property::Height, 3.0);
        pose.merge(&Pose::new().with(Property::Opacity, 1.0));

        assert_eq!(pose.get(Property::Opacity), Some(1.0));
        assert_eq!(pose.get(Property::Height), Some(3.0));
    }
}
