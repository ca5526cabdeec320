use serde::{Deserialize, Serialize};

/// A value that linked-data documents serialize either on its own or wrapped
/// in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(x) => vec![x],
            Self::Many(xs) => xs,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(x) => std::slice::from_ref(x).iter(),
            Self::Many(xs) => xs.iter(),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(xs) => xs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> OneOrMany<OneOrMany<T>> {
    /// Merge nested values into a single flat list, keeping document order.
    pub fn flatten(self) -> Vec<T> {
        self.into_vec()
            .into_iter()
            .flat_map(OneOrMany::into_vec)
            .collect()
    }
}

impl<T> FromIterator<T> for OneOrMany<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().collect())
    }
}

/// Collapse a list of values: nothing becomes `None`, a single value is
/// unwrapped, anything longer is kept as a list.
pub fn delistify<T>(mut values: Vec<T>) -> Option<OneOrMany<T>> {
    match values.len() {
        0 => None,
        1 => values.pop().map(OneOrMany::One),
        _ => Some(OneOrMany::Many(values)),
    }
}
