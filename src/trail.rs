use std::collections::VecDeque;

/// Fixed-capacity ring buffer of recent satellite positions.
///
/// Pushing beyond capacity drops the oldest point, so the animation trail
/// stays bounded no matter how many frames are rendered.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((x, y));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positions from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_stays_bounded() {
        let mut trail = Trail::new(3);
        for i in 0..10 {
            trail.push(i as f64, 0.0);
            assert!(trail.len() <= 3);
        }
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn oldest_points_are_dropped_first() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(i as f64, -(i as f64));
        }
        let points: Vec<_> = trail.iter().collect();
        assert_eq!(points, vec![(2.0, -2.0), (3.0, -3.0), (4.0, -4.0)]);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut trail = Trail::new(0);
        trail.push(1.0, 2.0);
        trail.push(3.0, 4.0);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.iter().next(), Some((3.0, 4.0)));
    }

    #[test]
    fn empty_trail_reports_empty() {
        let trail = Trail::new(5);
        assert!(trail.is_empty());
        assert_eq!(trail.iter().count(), 0);
    }
}
