use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("cannot set empty value to non-empty type")]
    Empty,
}

/// An ordered collection that is guaranteed to hold at least one element.
///
/// Used wherever a caller must supply an explicit, non-empty set, most
/// importantly the oracle adapter set handed to the execution engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "std::vec::Vec<T>")]
pub struct Vec<T>(std::vec::Vec<T>);

impl<T> TryFrom<std::vec::Vec<T>> for Vec<T> {
    type Error = Error;

    fn try_from(value: std::vec::Vec<T>) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(Error::Empty)
        } else {
            Ok(Vec(value))
        }
    }
}

impl<T> From<Vec<T>> for std::vec::Vec<T> {
    fn from(value: Vec<T>) -> Self {
        value.0
    }
}

impl<T> Vec<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &T {
        self.0.first().expect("vec is non-empty")
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a Vec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_vec_can_be_created_from_filled_vec() {
        assert!(Vec::try_from(vec![1, 2, 3]).is_ok())
    }

    #[test]
    fn non_empty_vec_cannot_be_created_from_empty_vec() {
        assert_eq!(Vec::<u8>::try_from(vec![]).unwrap_err(), Error::Empty)
    }

    #[test]
    fn first_returns_the_leading_element() {
        let vec = Vec::try_from(vec![7, 8]).unwrap();
        assert_eq!(*vec.first(), 7);
        assert_eq!(vec.len(), 2);
    }
}
