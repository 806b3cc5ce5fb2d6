//! Motion trail
//!
//! A bounded, most-recent-first history of pointer positions. The buffer
//! has no clock of its own: the engine pushes exactly once per frame.

use std::collections::VecDeque;

use reveal_paint::Point;

/// One remembered pointer position
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TrailPoint {
    pub position: Point,
    /// 0 for the most recent frame
    pub age: usize,
}

/// Fixed-capacity FIFO of past positions
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    points: VecDeque<Point>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Change the capacity, dropping the oldest points if it shrinks
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.points.truncate(capacity);
    }

    /// Insert at the front, evicting from the back beyond capacity
    pub fn push(&mut self, position: Point) {
        if self.capacity == 0 {
            return;
        }
        self.points.push_front(position);
        self.points.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Most recent position, if any
    pub fn latest(&self) -> Option<Point> {
        self.points.front().copied()
    }

    /// Ordered copy of the buffer, most recent first
    pub fn snapshot(&self) -> Vec<TrailPoint> {
        self.points
            .iter()
            .enumerate()
            .map(|(age, &position)| TrailPoint { position, age })
            .collect()
    }

    /// Render scale of a point relative to the aperture radii
    pub fn render_scale(&self, age: usize, decay: f32) -> f32 {
        render_scale(age, self.capacity, decay)
    }
}

/// `(1 - age / capacity) * decay`, strictly decreasing in `age` and zero at
/// or beyond capacity.
pub fn render_scale(age: usize, capacity: usize, decay: f32) -> f32 {
    if capacity == 0 || age >= capacity {
        return 0.0;
    }
    (1.0 - age as f32 / capacity as f32) * decay
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_and_evict() {
        let mut trail = TrailBuffer::new(3);
        for i in 0..5 {
            trail.push(Point::new(i as f32, 0.0));
            assert!(trail.len() <= 3);
            assert_eq!(trail.latest(), Some(Point::new(i as f32, 0.0)));
        }

        let snapshot = trail.snapshot();
        let xs: Vec<f32> = snapshot.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![4.0, 3.0, 2.0]);
        let ages: Vec<usize> = snapshot.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![0, 1, 2]);
    }

    #[test]
    fn test_clear_empties() {
        let mut trail = TrailBuffer::new(20);
        trail.push(Point::new(1.0, 1.0));
        trail.push(Point::new(2.0, 2.0));
        trail.clear();
        assert_eq!(trail.len(), 0);
        assert!(trail.snapshot().is_empty());
    }

    #[test]
    fn test_zero_capacity_disables_trail() {
        let mut trail = TrailBuffer::new(0);
        trail.push(Point::new(1.0, 1.0));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_shrinking_capacity_keeps_newest() {
        let mut trail = TrailBuffer::new(5);
        for i in 0..5 {
            trail.push(Point::new(i as f32, 0.0));
        }
        trail.set_capacity(2);
        let xs: Vec<f32> = trail.snapshot().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![4.0, 3.0]);
    }

    #[test]
    fn test_render_scale_strictly_decreases() {
        let trail = TrailBuffer::new(20);
        assert_eq!(trail.render_scale(0, 0.6), 0.6);
        for age in 1..20 {
            assert!(trail.render_scale(age, 0.6) < trail.render_scale(age - 1, 0.6));
            assert!(trail.render_scale(age, 0.6) > 0.0);
        }
        assert_eq!(trail.render_scale(20, 0.6), 0.0);
        assert_eq!(render_scale(3, 0, 0.6), 0.0);
    }
}
