//! Tests for perception FSM components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{Perception, PerceptionState};
    use crate::config::DetectionGeometry;

    fn geometry() -> DetectionGeometry {
        DetectionGeometry::new(15.0, 7.0, 2.0)
    }

    #[test]
    fn test_perception_state_default() {
        assert_eq!(PerceptionState::default(), PerceptionState::Idle);
        assert_eq!(Perception::default().transitions, 0);
        assert!(!Perception::default().tracking);
    }

    #[test]
    fn test_classification_boundaries_inclusive() {
        let geometry = geometry();

        assert_eq!(PerceptionState::from_distance(15.01, &geometry), PerceptionState::Idle);
        assert_eq!(PerceptionState::from_distance(15.0, &geometry), PerceptionState::Alert);
        assert_eq!(PerceptionState::from_distance(7.0, &geometry), PerceptionState::Chasing);
        assert_eq!(PerceptionState::from_distance(2.0, &geometry), PerceptionState::Attacking);
        assert_eq!(PerceptionState::from_distance(0.0, &geometry), PerceptionState::Attacking);
    }

    #[test]
    fn test_degenerate_radii_closest_test_wins() {
        // attack > inner > outer: attack тест первый → всё внутри 9м = Attacking
        let geometry = DetectionGeometry::new(1.0, 5.0, 9.0);

        assert_eq!(PerceptionState::from_distance(8.0, &geometry), PerceptionState::Attacking);
        assert_eq!(PerceptionState::from_distance(9.5, &geometry), PerceptionState::Idle);
    }

    #[test]
    fn test_zero_radii_only_attack_at_contact() {
        let geometry = DetectionGeometry::new(0.0, 0.0, 0.0);

        assert_eq!(PerceptionState::from_distance(0.0, &geometry), PerceptionState::Attacking);
        assert_eq!(PerceptionState::from_distance(0.1, &geometry), PerceptionState::Idle);
    }

    #[test]
    fn test_observe_reports_only_changes() {
        let geometry = geometry();
        let mut perception = Perception::default();

        assert_eq!(perception.observe(20.0, &geometry), None);
        assert_eq!(
            perception.observe(10.0, &geometry),
            Some((PerceptionState::Idle, PerceptionState::Alert))
        );
        assert_eq!(perception.observe(9.0, &geometry), None);
        assert_eq!(
            perception.observe(1.0, &geometry),
            Some((PerceptionState::Alert, PerceptionState::Attacking))
        );

        assert_eq!(perception.transitions, 2);
        assert_eq!(perception.distance, 1.0);
        assert!(perception.tracking);
    }

    #[test]
    fn test_scenario_walk_in_and_back_out() {
        let geometry = geometry();
        let mut perception = Perception::default();
        let mut visited = Vec::new();
        let mut changed_at = Vec::new();

        for (index, distance) in [20.0, 10.0, 3.0, 1.0, 10.0, 20.0].into_iter().enumerate() {
            if perception.observe(distance, &geometry).is_some() {
                changed_at.push(index);
            }
            visited.push(perception.current);
        }

        assert_eq!(
            visited,
            vec![
                PerceptionState::Idle,
                PerceptionState::Alert,
                PerceptionState::Chasing,
                PerceptionState::Attacking,
                PerceptionState::Alert,
                PerceptionState::Idle,
            ]
        );
        // 1 → 10: сразу Alert (10 > inner radius), Chasing пропускается
        assert_eq!(changed_at, vec![1, 2, 3, 4, 5]);
        assert_eq!(perception.transitions, 5);
    }

    #[test]
    fn test_lose_track_freezes_state() {
        let geometry = geometry();
        let mut perception = Perception::default();
        perception.observe(5.0, &geometry);

        perception.lose_track();

        assert!(!perception.tracking);
        assert_eq!(perception.current, PerceptionState::Chasing);
        assert_eq!(perception.previous, PerceptionState::Chasing);
    }

    #[test]
    fn test_engaged_states() {
        assert!(!PerceptionState::Idle.is_engaged());
        assert!(!PerceptionState::Alert.is_engaged());
        assert!(PerceptionState::Chasing.is_engaged());
        assert!(PerceptionState::Attacking.is_engaged());
    }
}
