// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which fields are bound to the X and Y axes.

use std::fmt;

use crate::dataset::Field;

/// Fields selectable on the X axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum XField {
    /// Poverty (%).
    #[default]
    Poverty,
    /// Median age.
    Age,
    /// Median household income.
    Income,
}

impl XField {
    /// Every X field, in label-control order.
    pub const ALL: [Self; 3] = [Self::Poverty, Self::Age, Self::Income];

    /// Returns the dataset field.
    pub const fn field(self) -> Field {
        match self {
            Self::Poverty => Field::Poverty,
            Self::Age => Field::Age,
            Self::Income => Field::Income,
        }
    }
}

/// Fields selectable on the Y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum YField {
    /// Lacks healthcare (%).
    #[default]
    Healthcare,
    /// Smokes (%).
    Smokes,
    /// Obese (%).
    Obesity,
}

impl YField {
    /// Every Y field.
    pub const ALL: [Self; 3] = [Self::Healthcare, Self::Smokes, Self::Obesity];

    /// Returns the dataset field.
    pub const fn field(self) -> Field {
        match self {
            Self::Healthcare => Field::Healthcare,
            Self::Smokes => Field::Smokes,
            Self::Obesity => Field::Obesity,
        }
    }
}

/// A chart axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// A field choice on one axis: what a label control selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisChoice {
    /// Bind an X field.
    X(XField),
    /// Bind a Y field.
    Y(YField),
}

impl AxisChoice {
    /// Returns the axis this choice applies to.
    pub const fn axis(self) -> Axis {
        match self {
            Self::X(_) => Axis::X,
            Self::Y(_) => Axis::Y,
        }
    }

    /// Returns the dataset field.
    pub const fn field(self) -> Field {
        match self {
            Self::X(x) => x.field(),
            Self::Y(y) => y.field(),
        }
    }

    /// Returns the `value` tag carried by the matching label control.
    pub const fn value(self) -> &'static str {
        self.field().name()
    }

    /// Resolves a `value` tag on `axis` back to a choice.
    pub fn from_value(axis: Axis, value: &str) -> Option<Self> {
        match axis {
            Axis::X => XField::ALL
                .into_iter()
                .find(|x| x.field().name() == value)
                .map(Self::X),
            Axis::Y => YField::ALL
                .into_iter()
                .find(|y| y.field().name() == value)
                .map(Self::Y),
        }
    }
}

/// The pair of fields currently plotted.
///
/// Defaults to poverty against healthcare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AxisSelection {
    /// X field.
    pub x: XField,
    /// Y field.
    pub y: YField,
}

impl AxisSelection {
    /// Creates a selection.
    pub const fn new(x: XField, y: YField) -> Self {
        Self { x, y }
    }

    /// Returns the selection with `choice` applied; the other axis is unchanged.
    #[must_use]
    pub const fn with(self, choice: AxisChoice) -> Self {
        match choice {
            AxisChoice::X(x) => Self { x, ..self },
            AxisChoice::Y(y) => Self { y, ..self },
        }
    }

    /// Returns whether `choice` is the active field on its axis.
    pub fn is_active(&self, choice: AxisChoice) -> bool {
        match choice {
            AxisChoice::X(x) => self.x == x,
            AxisChoice::Y(y) => self.y == y,
        }
    }

    /// Returns the field bound to `axis`.
    pub const fn field(&self, axis: Axis) -> Field {
        match axis {
            Axis::X => self.x.field(),
            Axis::Y => self.y.field(),
        }
    }

    /// Returns the axes whose field differs between `self` and `other`.
    pub fn changed_axes(&self, other: &Self) -> impl Iterator<Item = Axis> {
        let x = (self.x != other.x).then_some(Axis::X);
        let y = (self.y != other.y).then_some(Axis::Y);
        x.into_iter().chain(y)
    }
}

impl fmt::Display for AxisSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x.field(), self.y.field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_poverty_vs_healthcare() {
        let s = AxisSelection::default();
        assert_eq!(s.field(Axis::X), Field::Poverty);
        assert_eq!(s.field(Axis::Y), Field::Healthcare);
        assert_eq!(s.to_string(), "(poverty, healthcare)");
    }

    #[test]
    fn with_changes_only_one_axis() {
        let s = AxisSelection::default().with(AxisChoice::X(XField::Age));
        assert_eq!(s, AxisSelection::new(XField::Age, YField::Healthcare));
        let s = s.with(AxisChoice::Y(YField::Smokes));
        assert_eq!(s, AxisSelection::new(XField::Age, YField::Smokes));
    }

    #[test]
    fn changed_axes_lists_differences() {
        let a = AxisSelection::default();
        let b = a.with(AxisChoice::Y(YField::Obesity));
        assert_eq!(a.changed_axes(&b).collect::<Vec<_>>(), vec![Axis::Y]);
        assert_eq!(a.changed_axes(&a).count(), 0);
    }

    #[test]
    fn values_round_trip_per_axis() {
        for x in XField::ALL {
            let c = AxisChoice::X(x);
            assert_eq!(AxisChoice::from_value(Axis::X, c.value()), Some(c));
        }
        for y in YField::ALL {
            let c = AxisChoice::Y(y);
            assert_eq!(AxisChoice::from_value(Axis::Y, c.value()), Some(c));
        }
        assert_eq!(AxisChoice::from_value(Axis::X, "smokes"), None);
    }
}
