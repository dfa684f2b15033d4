//! Bounded integer array specification.

use serde::Serialize;

/// Shape and closed value interval of one observation or action field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArraySpec {
    pub name: &'static str,
    /// Empty for scalars.
    pub shape: Vec<usize>,
    pub minimum: i32,
    pub maximum: i32,
}

impl ArraySpec {
    pub fn new(name: &'static str, shape: &[usize], minimum: i32, maximum: i32) -> Self {
        Self {
            name,
            shape: shape.to_vec(),
            minimum,
            maximum,
        }
    }

    pub fn scalar(name: &'static str, minimum: i32, maximum: i32) -> Self {
        Self::new(name, &[], minimum, maximum)
    }

    /// Number of scalar elements a conforming value holds.
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::ArraySpec;

    #[test]
    fn scalar_has_one_element() {
        let spec = ArraySpec::scalar("color", 0, 1);
        assert_eq!(spec.element_count(), 1);
        assert!(spec.contains(0));
        assert!(spec.contains(1));
        assert!(!spec.contains(2));
    }

    #[test]
    fn matrix_element_count() {
        assert_eq!(ArraySpec::new("board", &[8, 8], -6, 6).element_count(), 64);
    }
}
