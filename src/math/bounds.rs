use glam::DVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: DVec3,
    pub max: DVec3,
}

impl AABB {
    pub fn new(point1: DVec3, point2: DVec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<AABB> {
        let mut points = points.into_iter();
        let first = points.next()?;

        Some(points.fold(AABB::new(first, first), |aabb, point| AABB {
            min: aabb.min.min(point),
            max: aabb.max.max(point),
        }))
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_empty() {
        assert!(AABB::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_from_points_covers_all_points() {
        let points = vec![
            DVec3::new(1.0, -2.0, 0.5),
            DVec3::new(-1.0, 4.0, 0.0),
            DVec3::new(0.0, 0.0, 3.0),
        ];
        let aabb = AABB::from_points(points.iter().copied()).unwrap();

        assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 4.0, 3.0));
        assert_eq!(aabb.center(), DVec3::new(0.0, 1.0, 1.5));
        assert_eq!(aabb.size(), DVec3::new(2.0, 6.0, 3.0));
    }

    #[test]
    fn test_new_orders_corners() {
        let aabb = AABB::new(DVec3::new(1.0, 1.0, 1.0), DVec3::ZERO);
        assert_eq!(aabb.min, DVec3::ZERO);
        assert_eq!(aabb.max, DVec3::ONE);
    }
}
