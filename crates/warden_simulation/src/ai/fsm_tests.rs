//! Tests for behavior selection.

#[cfg(test)]
mod tests {
    use super::super::fsm::{select_behavior, Behavior, CurrentBehavior, DeadZonePolicy};
    use super::super::PerceptionState;

    fn perception(in_sight: bool, in_attack: bool) -> PerceptionState {
        PerceptionState {
            target_in_sight: in_sight,
            target_in_attack_range: in_attack,
        }
    }

    #[test]
    fn test_priority_table_fidelity_policy() {
        let policy = DeadZonePolicy::Idle;

        assert_eq!(select_behavior(perception(false, false), policy), Behavior::Patrol);
        assert_eq!(select_behavior(perception(true, false), policy), Behavior::Chase);
        assert_eq!(select_behavior(perception(true, true), policy), Behavior::Attack);
        // Dead zone: ни одна ветка не срабатывает
        assert_eq!(select_behavior(perception(false, true), policy), Behavior::Idle);
    }

    #[test]
    fn test_priority_table_attack_policy() {
        let policy = DeadZonePolicy::Attack;

        assert_eq!(select_behavior(perception(false, false), policy), Behavior::Patrol);
        assert_eq!(select_behavior(perception(true, false), policy), Behavior::Chase);
        assert_eq!(select_behavior(perception(true, true), policy), Behavior::Attack);
        assert_eq!(select_behavior(perception(false, true), policy), Behavior::Attack);
    }

    #[test]
    fn test_selection_is_memoryless() {
        // Шумный сенсор: каждый тик решение зависит только от текущего входа
        let inputs = [
            perception(true, true),
            perception(true, false),
            perception(true, true),
            perception(false, false),
            perception(true, true),
        ];
        let selected: Vec<_> = inputs
            .iter()
            .map(|p| select_behavior(*p, DeadZonePolicy::default()))
            .collect();

        assert_eq!(
            selected,
            vec![
                Behavior::Attack,
                Behavior::Chase,
                Behavior::Attack,
                Behavior::Patrol,
                Behavior::Attack,
            ]
        );
    }

    #[test]
    fn test_current_behavior_default_is_idle() {
        assert_eq!(CurrentBehavior::default().0, Behavior::Idle);
        assert_eq!(Behavior::Chase.as_str(), "Chase");
    }
}
