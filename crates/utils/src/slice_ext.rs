use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Check the values are finite and strictly increasing
    ///
    /// Interpolation nodes and bin edges both rely on this.
    ///
    /// ```rust
    /// # use n2n_utils::SliceExt;
    /// # use n2n_utils::Error;
    /// assert_eq!([20.0, 22.0, 24.0].check_ascending(), Ok(()));
    ///
    /// // The index of the first offending value is reported
    /// assert_eq!(
    ///     [20.0, 22.0, 22.0].check_ascending(),
    ///     Err(Error::SliceNotAscending { index: 2 })
    /// );
    /// ```
    fn check_ascending(&self) -> Result<()>;

    /// Find the segment index `i` such that `self[i] <= value < self[i+1]`
    ///
    /// Unlike a strict bin search, values beyond either end are clamped to
    /// the first or last segment so that callers can extrapolate with the
    /// outermost piece. A value on an interior node starts the segment above
    /// it, and the final node closes the last segment.
    ///
    /// ```rust
    /// # use n2n_utils::SliceExt;
    /// let nodes = vec![20.0, 22.0, 24.0, 26.0];
    ///
    /// assert_eq!(nodes.find_segment(21.0), Ok(0));
    /// assert_eq!(nodes.find_segment(22.0), Ok(1));
    /// assert_eq!(nodes.find_segment(26.0), Ok(2));
    ///
    /// // Values outside the nodes use the outermost segments
    /// assert_eq!(nodes.find_segment(10.0), Ok(0));
    /// assert_eq!(nodes.find_segment(30.0), Ok(2));
    /// ```
    fn find_segment(&self, value: T) -> Result<usize>;
}

impl SliceExt<f64> for [f64] {
    fn check_ascending(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::SliceContainsNoValues);
        }

        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        }

        match self.windows(2).position(|w| w[0] >= w[1]) {
            Some(i) => Err(Error::SliceNotAscending { index: i + 1 }),
            None => Ok(()),
        }
    }

    fn find_segment(&self, value: f64) -> Result<usize> {
        // make sure there is at least one segment to look in
        let n = self.len();
        if n < 2 {
            return Err(Error::BelowMinimumSliceLength {
                length: n,
                minimum_required: 2,
            });
        }

        if !value.is_finite() {
            return Err(Error::UndefinedLookupValue);
        }

        // first interior node above the value, clamped to the end segments
        let upper = self[1..n - 1]
            .iter()
            .position(|node| value < *node)
            .unwrap_or(n - 2);

        Ok(upper)
    }
}
