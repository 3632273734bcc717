use gear_core::prelude::*;
use gear_core::LockError;
use proptest::prelude::*;

fn solver_for<'a>(data: &GameData, config: &BuildConfig, locked: &'a LockedSet) -> GearSolver<'a> {
    GearSolver::new(&data.rules, &data.values, config, locked).unwrap()
}

fn iaido() -> BuildConfig {
    BuildConfig::new("Stormblade", "Iaido")
}

#[test]
fn test_empty_requirements_accept_everything() {
    let data = GameData::standard();
    let locked = LockedSet::new();
    let solver = solver_for(&data, &iaido(), &locked);

    let solutions = solver.solve_with_cap(None);
    // One selection, one placement, four regular slots with 12 choices each
    assert_eq!(solutions.len(), 12usize.pow(4));
    assert!(solutions
        .iter()
        .all(|s| s.gems().is_zero() && s.reforges().is_zero() && s.totals() == s.gear_totals()));
}

#[test]
fn test_unique_pair_needs_no_spend() {
    let data = GameData::standard();
    let locked = LockedSet::new();
    let mut config = iaido();
    // Six unique pieces at one primary each plus the weapon
    let floor = 6 * 200 + 384;
    config.requirements = Requirements::new().with(Stat::Crit, floor);
    config.max_solutions = Some(200);
    let solver = solver_for(&data, &config, &locked);

    let solutions = solver.solve();
    assert_eq!(solutions.len(), 200);
    for solution in &solutions {
        assert!(solution.gear_totals()[Stat::Crit] >= floor);
        assert_eq!(solution.gems()[Stat::Crit], 0);
        assert_eq!(solution.reforges()[Stat::Crit], 0);
    }
}

#[test]
fn test_spend_only_when_gear_falls_short() {
    let data = GameData::standard();
    let locked = LockedSet::new();
    let mut config = iaido();
    config.requirements = Requirements::new().with(Stat::Crit, 2000);
    config.max_solutions = Some(200);
    let solver = solver_for(&data, &config, &locked);

    let solutions = solver.solve();
    assert_eq!(solutions.len(), 200);
    let mut topped_up = 0;
    for solution in &solutions {
        let spent = solution.gems()[Stat::Crit] + solution.reforges()[Stat::Crit];
        if solution.gear_totals()[Stat::Crit] >= 2000 {
            assert_eq!(spent, 0);
        } else {
            assert!(spent > 0);
            topped_up += 1;
        }
    }
    assert!(topped_up > 0);
}

#[test]
fn test_fully_locked_beyond_capacity_is_empty() {
    let data = GameData::standard();
    let mut locked = LockedSet::new();
    for &slot in Slot::all() {
        locked
            .add_piece(LockedPiece::regular(slot, Stat::Haste, Stat::Luck))
            .unwrap();
    }
    let mut config = iaido();
    config.requirements = Requirements::new().with(Stat::Versatility, 5000);
    let solver = solver_for(&data, &config, &locked);

    assert!(solver.solve().is_empty());
    assert!(solver.solutions().next().is_none());
}

#[test]
fn test_duplicate_lock_leaves_set_unchanged() {
    let mut locked = LockedSet::new();
    locked.add_piece(LockedPiece::unique(Slot::Boots)).unwrap();

    let err = locked
        .add_piece(LockedPiece::regular(Slot::Boots, Stat::Crit, Stat::Haste))
        .unwrap_err();
    assert_eq!(err, LockError::SlotAlreadyLocked(Slot::Boots));
    assert_eq!(locked.len(), 1);
    assert!(locked.get(Slot::Boots).unwrap().is_unique());
}

#[test]
fn test_enumeration_order() {
    let data = GameData::standard();
    let locked = LockedSet::new();
    let solver = solver_for(&data, &iaido(), &locked);

    let first_two: Vec<_> = solver.solutions().take(2).collect();
    let first = &first_two[0];
    assert_eq!(&first.slots()[..4], &[Slot::Earrings, Slot::Ring, Slot::Charm, Slot::Necklace]);
    assert_eq!(first.unique_slots(), &data.rules.optional_slots[..]);

    // Earrings cannot carry Haste for Agility classes
    assert_eq!(
        first.assignment()[0].stats,
        SlotStats::Regular {
            main: Stat::Crit,
            sub: Stat::Mastery,
        }
    );

    // The last regular slot turns first; Necklace cannot carry Mastery
    let second = &first_two[1];
    assert_eq!(first.assignment()[..3], second.assignment()[..3]);
    assert_eq!(
        first.assignment()[3].stats,
        SlotStats::Regular {
            main: Stat::Crit,
            sub: Stat::Haste,
        }
    );
    assert_eq!(
        second.assignment()[3].stats,
        SlotStats::Regular {
            main: Stat::Crit,
            sub: Stat::Versatility,
        }
    );
}

#[test]
fn test_cap_returns_prefix() {
    let data = GameData::standard();
    let locked = LockedSet::new();
    let mut config = iaido();
    config.requirements = Requirements::new().with(Stat::Versatility, 1000).with(Stat::Luck, 600);
    let solver = solver_for(&data, &config, &locked);

    let short = solver.solve_with_cap(Some(25));
    let long = solver.solve_with_cap(Some(100));
    assert_eq!(short.len(), 25);
    assert_eq!(long.len(), 100);
    assert_eq!(&long[..25], &short[..]);
}

#[test]
fn test_solving_is_deterministic() {
    let data = GameData::standard();
    let mut locked = LockedSet::new();
    locked
        .add_piece(
            LockedPiece::regular(Slot::Ring, Stat::Versatility, Stat::Luck).with_gem(Stat::Luck),
        )
        .unwrap();
    let mut config = BuildConfig::new("Frost Mage", "Icicle");
    config.requirements = Requirements::new().with(Stat::Haste, 1200);
    config.max_solutions = Some(150);

    let a = solver_for(&data, &config, &locked).solve();
    let b = solver_for(&data, &config, &locked).solve();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_allocation_closes_deficits() {
    let data = GameData::standard();
    let locked = LockedSet::new();
    let mut config = iaido();
    config.requirements = Requirements::new().with(Stat::Versatility, 1800);
    config.max_solutions = Some(50);
    let solver = solver_for(&data, &config, &locked);

    let solutions = solver.solve();
    assert!(!solutions.is_empty());
    for solution in &solutions {
        assert!(solution.totals()[Stat::Versatility] >= 1800);
        let spent = solution.gems()[Stat::Versatility] + solution.reforges()[Stat::Versatility];
        if solution.gear_totals()[Stat::Versatility] < 1800 {
            assert!(spent > 0);
        }
    }
}

#[test]
fn test_locked_gear_counts_toward_totals() {
    let data = GameData::standard();
    let mut locked = LockedSet::new();
    locked
        .add_piece(
            LockedPiece::regular(Slot::Charm, Stat::Versatility, Stat::Crit)
                .with_reforge(Stat::Versatility),
        )
        .unwrap();
    let mut config = iaido();
    config.max_solutions = Some(10);
    let solver = solver_for(&data, &config, &locked);

    let first = solver.solve().remove(0);
    assert_eq!(first.slots()[0], Slot::Charm);
    assert_eq!(first.slots().len(), 10);
    assert!(first.assignment().iter().all(|a| a.slot != Slot::Charm));
    assert!(first.gear_totals()[Stat::Versatility] >= 200 + 60);
}

#[test]
fn test_too_many_unique_rejected() {
    let data = GameData::standard();
    let locked = LockedSet::new();
    let mut config = iaido();
    config.unique_count = 9;
    let err = GearSolver::new(&data.rules, &data.values, &config, &locked).unwrap_err();
    assert_eq!(err, BuildError::TooManyUniquePieces(9));
}

fn class_and_role() -> impl Strategy<Value = (String, String)> {
    let rules = Ruleset::standard();
    let pairs: Vec<(String, String)> = rules
        .classes
        .iter()
        .flat_map(|c| c.roles.iter().map(move |r| (c.name.clone(), r.name.clone())))
        .collect();
    proptest::sample::select(pairs)
}

fn requirements() -> impl Strategy<Value = Requirements> {
    proptest::collection::vec((0..Stat::COUNT, 0u32..2500), 0..4).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(i, threshold)| (Stat::all()[i], threshold))
            .collect()
    })
}

fn gem_value() -> impl Strategy<Value = GemValue> {
    prop_oneof![Just(GemValue::Min), Just(GemValue::Avg), Just(GemValue::Max)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_solutions_are_legal(
        (class, role) in class_and_role(),
        reqs in requirements(),
        gems in gem_value(),
        tier in prop_oneof![Just(60u32), Just(80u32)],
    ) {
        let data = GameData::standard();
        let locked = LockedSet::new();
        let mut config = BuildConfig::new(class.clone(), role);
        config.requirements = reqs.clone();
        config.gem_value = gems;
        config.gear_tier = tier;
        let solver = solver_for(&data, &config, &locked);
        let attribute = data.rules.attribute_of(&class).unwrap();

        for solution in solver.solve_with_cap(Some(20)) {
            prop_assert!(reqs.is_met_by(solution.totals()));
            prop_assert!(solution.gems().sum() <= 11);
            prop_assert!(solution.reforges().sum() <= 11);
            prop_assert!(solution.unique_slots().len() <= 6);

            let mut slots = solution.slots().to_vec();
            slots.sort();
            slots.dedup();
            prop_assert_eq!(slots.len(), 10);

            for a in solution.assignment() {
                match a.stats {
                    SlotStats::Regular { main, sub } => {
                        let forbidden = data.rules.forbidden_stat(a.slot, attribute);
                        prop_assert_ne!(main, sub);
                        prop_assert_ne!(Some(main), forbidden);
                        prop_assert_ne!(Some(sub), forbidden);
                    }
                    SlotStats::Unique { stats } => {
                        prop_assert_eq!(stats, solver.unique_pair());
                        prop_assert!(data.rules.is_unique_eligible(a.slot));
                    }
                }
            }
        }
    }
}

fn mandatory_locks() -> impl Strategy<Value = Vec<Option<(usize, usize, Option<usize>)>>> {
    proptest::collection::vec(
        proptest::option::of((
            0..Stat::COUNT,
            0..Stat::COUNT,
            proptest::option::of(0..Stat::COUNT),
        )),
        4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_locked_gear_is_respected(
        (class, role) in class_and_role(),
        locks in mandatory_locks(),
        reqs in requirements(),
    ) {
        let data = GameData::standard();
        let attribute = data.rules.attribute_of(&class).unwrap();

        let mut locked = LockedSet::new();
        for (&slot, lock) in data.rules.mandatory_slots.iter().zip(locks) {
            let Some((main, sub, gem)) = lock else { continue };
            let mut piece = LockedPiece::regular(slot, Stat::all()[main], Stat::all()[sub]);
            if let Some(gem) = gem {
                piece = piece.with_gem(Stat::all()[gem]);
            }
            if piece.validate(&data.rules, attribute).is_ok() {
                locked.add_piece(piece).unwrap();
            }
        }

        let mut config = BuildConfig::new(class, role);
        config.requirements = reqs.clone();
        let solver = solver_for(&data, &config, &locked);
        let pool = locked.available_resources();
        prop_assert_eq!(solver.available_resources(), pool);

        let locked_slots: Vec<Slot> = locked.slots().collect();
        for solution in solver.solve_with_cap(Some(20)) {
            prop_assert!(reqs.is_met_by(solution.totals()));
            prop_assert!(solution.gems().sum() <= pool.gems);
            prop_assert!(solution.reforges().sum() <= pool.reforges);
            prop_assert_eq!(&solution.slots()[..locked_slots.len()], &locked_slots[..]);
            prop_assert_eq!(solution.assignment().len(), 10 - locked_slots.len());
            prop_assert!(solution.assignment().iter().all(|a| !locked.is_locked(a.slot)));
        }
    }
}
