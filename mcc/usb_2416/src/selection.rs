//! Selection of one or many channels, and readings that mirror the shape of the selection.

/// One channel or a list of channels that an accessor operation acts on.
///
/// You rarely need to build this yourself: Every accessor operation takes an
/// `impl Into<Channels>`, so a single `usize`, a `Vec<usize>`, an array, or a slice can be passed
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channels {
    /// A single channel.
    Single(usize),
    /// A list of channels, processed in order.
    Many(Vec<usize>),
}

impl Channels {
    /// Iterate over the selected channel indices in order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let indices: &[usize] = match self {
            Channels::Single(idx) => std::slice::from_ref(idx),
            Channels::Many(indices) => indices,
        };
        indices.iter().copied()
    }

    /// Number of selected channels.
    pub fn len(&self) -> usize {
        match self {
            Channels::Single(_) => 1,
            Channels::Many(indices) => indices.len(),
        }
    }

    /// Check if no channel is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call a fallible function for every selected channel and collect the results into
    /// [`Readings`] of the same shape. The first error stops the iteration.
    pub fn try_map<R, E, F>(&self, mut f: F) -> Result<Readings<R>, E>
    where
        F: FnMut(usize) -> Result<R, E>,
    {
        match self {
            Channels::Single(idx) => Ok(Readings::Single(f(*idx)?)),
            Channels::Many(indices) => indices
                .iter()
                .map(|idx| f(*idx))
                .collect::<Result<Vec<R>, E>>()
                .map(Readings::Many),
        }
    }
}

impl From<usize> for Channels {
    fn from(value: usize) -> Self {
        Channels::Single(value)
    }
}

impl From<Vec<usize>> for Channels {
    fn from(value: Vec<usize>) -> Self {
        Channels::Many(value)
    }
}

impl From<&[usize]> for Channels {
    fn from(value: &[usize]) -> Self {
        Channels::Many(value.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Channels {
    fn from(value: [usize; N]) -> Self {
        Channels::Many(value.to_vec())
    }
}

/// Readings of an accessor operation, in the shape of the [`Channels`] that were read.
#[derive(Debug, Clone, PartialEq)]
pub enum Readings<T> {
    /// The reading of a single channel.
    Single(T),
    /// One reading per channel, in the order the channels were given.
    Many(Vec<T>),
}

impl<T> Readings<T> {
    /// Get the reading of a single channel, `None` if a list of channels was read.
    pub fn single(self) -> Option<T> {
        match self {
            Readings::Single(value) => Some(value),
            Readings::Many(_) => None,
        }
    }

    /// Get all readings as a vector, independent of the shape.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Readings::Single(value) => vec![value],
            Readings::Many(values) => values,
        }
    }

    /// Call a fallible function for every reading, keeping the shape. The first error stops the
    /// iteration.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Readings<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        match self {
            Readings::Single(value) => {
                let mut f = f;
                Ok(Readings::Single(f(value)?))
            }
            Readings::Many(values) => values
                .into_iter()
                .map(f)
                .collect::<Result<Vec<U>, E>>()
                .map(Readings::Many),
        }
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        match self {
            Readings::Single(_) => 1,
            Readings::Many(values) => values.len(),
        }
    }

    /// Check if there are no readings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(Channels::from(3), vec![3])]
    #[case(Channels::from(vec![2, 3]), vec![2, 3])]
    #[case(Channels::from([5, 1, 5]), vec![5, 1, 5])]
    #[case(Channels::from(&[7usize][..]), vec![7])]
    #[case(Channels::from(Vec::<usize>::new()), vec![])]
    fn test_iter(#[case] channels: Channels, #[case] exp: Vec<usize>) {
        assert_eq!(channels.iter().collect::<Vec<_>>(), exp);
        assert_eq!(channels.len(), exp.len());
    }

    #[rstest]
    fn test_try_map_mirrors_shape() {
        let single = Channels::from(4).try_map(|idx| Ok::<_, ()>(idx * 2));
        assert_eq!(single, Ok(Readings::Single(8)));

        let many = Channels::from(vec![1, 2]).try_map(|idx| Ok::<_, ()>(idx * 2));
        assert_eq!(many, Ok(Readings::Many(vec![2, 4])));

        // a list with one entry stays a list
        let one = Channels::from(vec![1]).try_map(|idx| Ok::<_, ()>(idx));
        assert_eq!(one.unwrap().single(), None);
    }

    #[rstest]
    fn test_try_map_stops_at_error() {
        let mut visited = Vec::new();
        let res = Channels::from(vec![0, 1, 2]).try_map(|idx| {
            visited.push(idx);
            if idx == 1 { Err("fail") } else { Ok(idx) }
        });
        assert_eq!(res, Err("fail"));
        assert_eq!(visited, vec![0, 1]);
    }

    #[rstest]
    fn test_readings_into_vec() {
        assert_eq!(Readings::Single(1.0).into_vec(), vec![1.0]);
        assert_eq!(Readings::Many(vec![1.0, 2.0]).into_vec(), vec![1.0, 2.0]);
        assert!(Readings::<f64>::Many(vec![]).is_empty());
    }
}
