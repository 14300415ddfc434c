use fogrounder::{
    generators::{
        lookup_generator, values_of, ChainGenerator, CloneableGenerator, ComparisonGenerator,
        EnumLookupGenerator, InverseAbsGenerator, Pattern, SortInstGenerator, TableGenerator,
        TrueQuantKernelGenerator, VarCell,
    },
    structure::{
        ElementFactory, ElementTuple, EnumeratedPredTable, EnumeratedSortTable, IntRangeSortTable,
        PredTable, SortTable, Universe,
    },
    utils::CompType,
};
use proptest::prelude::*;
use std::{collections::HashSet, rc::Rc};
use strum::IntoEnumIterator;

const PATTERNS: [[Pattern; 2]; 4] = [
    [Pattern::Input, Pattern::Input],
    [Pattern::Input, Pattern::Output],
    [Pattern::Output, Pattern::Input],
    [Pattern::Output, Pattern::Output],
];

// runs a round without going through the InstGenerator upcast
fn run_round(generator: &mut dyn CloneableGenerator, outputs: &[VarCell]) -> Vec<ElementTuple> {
    let mut instances = Vec::new();
    generator.begin();
    while !generator.is_at_end() {
        instances.push(values_of(outputs));
        generator.next();
    }
    instances
}

/// Drives a generator through a round and checks the replay law on its output cells.
///
/// No instantiation may be produced twice in a round.
/// `set_vars_again` must restore the outputs after they have been overwritten.
/// A second round and a clone must replay the same sequence.
fn assert_replay_law(
    generator: &mut dyn CloneableGenerator,
    outputs: &[VarCell],
    factory: &ElementFactory,
) -> Vec<ElementTuple> {
    let clobbered = factory.string("clobbered");
    let mut produced = Vec::new();
    let mut seen = HashSet::new();
    generator.begin();
    while !generator.is_at_end() {
        let tuple = values_of(outputs);
        assert!(
            seen.insert(tuple.clone()),
            "{} produced {:?} twice",
            generator,
            tuple
        );
        outputs.iter().for_each(|c| c.set(clobbered.clone()));
        generator.set_vars_again();
        assert_eq!(tuple, values_of(outputs), "{} did not restore its outputs", generator);
        produced.push(tuple);
        generator.next();
    }
    assert_eq!(produced, run_round(generator, outputs));
    let mut copy = generator.clone_generator();
    assert_eq!(produced, run_round(copy.as_mut(), outputs));
    produced
}

fn sort_of(factory: &ElementFactory, values: &[i64]) -> Rc<dyn SortTable> {
    Rc::new(EnumeratedSortTable::new(
        values.iter().map(|v| factory.int(*v)).collect(),
    ))
}

fn pairs_of(factory: &ElementFactory, pairs: &[(i64, i64)]) -> Rc<dyn PredTable> {
    let tuples = pairs
        .iter()
        .map(|(a, b)| vec![factory.int(*a), factory.int(*b)])
        .collect();
    Rc::new(EnumeratedPredTable::new_with_tuples(2, tuples).unwrap())
}

fn small_universe(factory: &Rc<ElementFactory>) -> Universe {
    let range: Rc<dyn SortTable> = Rc::new(IntRangeSortTable::new(0, 3, Rc::clone(factory)));
    Universe::new(vec![Rc::clone(&range), range])
}

fn sorted(mut tuples: Vec<ElementTuple>) -> Vec<ElementTuple> {
    tuples.sort();
    tuples
}

fn small_values() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-4i64..5, 0..7)
}

fn small_pairs() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..5, 0i64..5), 0..10)
}

proptest! {
    #[test]
    fn prop_sort_inst_replay(values in small_values()) {
        let factory = ElementFactory::default();
        let x = VarCell::new("x");
        let table = sort_of(&factory, &values);
        let mut generator = SortInstGenerator::new(x.clone(), Rc::clone(&table)).unwrap();
        let produced = assert_replay_law(&mut generator, &[x], &factory);
        prop_assert_eq!(table.size(), Some(produced.len()));
    }

    #[test]
    fn prop_enum_lookup_replay(pairs in small_pairs(), key in 0i64..5) {
        let factory = Rc::new(ElementFactory::default());
        let table = pairs_of(&factory, &pairs);
        let universe = small_universe(&factory);
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let cells = [x.clone(), y.clone()];
        let mut joint = EnumLookupGenerator::new_from_pred_table(
            table.as_ref(),
            &universe,
            &[Pattern::Output, Pattern::Output],
            &cells,
        )
        .unwrap();
        let produced = assert_replay_law(&mut joint, &cells, &factory);
        let expected = sorted(
            table
                .tuples()
                .unwrap()
                .filter(|t| universe.contains(t))
                .cloned()
                .collect(),
        );
        prop_assert_eq!(expected, sorted(produced));
        x.set(factory.int(key));
        let mut bound = lookup_generator(
            Rc::clone(&table),
            &universe,
            &[Pattern::Input, Pattern::Output],
            &cells,
        )
        .unwrap();
        let produced = assert_replay_law(bound.as_mut(), &[y], &factory);
        let expected = pairs
            .iter()
            .filter(|(a, b)| *a == key && key <= 3 && *b <= 3)
            .map(|(_, b)| *b)
            .collect::<HashSet<i64>>();
        prop_assert_eq!(expected.len(), produced.len());
    }

    #[test]
    fn prop_table_replay(pairs in small_pairs(), key in 0i64..5, other in 0i64..5) {
        let factory = Rc::new(ElementFactory::default());
        let table = pairs_of(&factory, &pairs);
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let cells = vec![x.clone(), y.clone()];
        x.set(factory.int(key));
        let mut mixed = TableGenerator::new(
            Rc::clone(&table),
            small_universe(&factory),
            &[Pattern::Input, Pattern::Output],
            cells.clone(),
        )
        .unwrap();
        let produced = assert_replay_law(&mut mixed, &[y.clone()], &factory);
        for tuple in produced {
            prop_assert!(table.contains(&[factory.int(key), tuple[0].clone()]));
        }
        y.set(factory.int(other));
        let mut checker = TableGenerator::new(
            Rc::clone(&table),
            small_universe(&factory),
            &[Pattern::Input, Pattern::Input],
            cells,
        )
        .unwrap();
        let produced = assert_replay_law(&mut checker, &[], &factory);
        prop_assert!(produced.len() <= 1);
    }

    #[test]
    fn prop_comparison_replay(
        left_values in small_values(),
        right_values in small_values(),
        left_input in -4i64..5,
        right_input in -4i64..5,
    ) {
        let factory = ElementFactory::default();
        let left_table = sort_of(&factory, &left_values);
        let right_table = sort_of(&factory, &right_values);
        for comp in CompType::iter() {
            for pattern in PATTERNS {
                let (x, y) = (VarCell::new("x"), VarCell::new("y"));
                let mut generator = ComparisonGenerator::new(
                    (x.clone(), Rc::clone(&left_table)),
                    (y.clone(), Rc::clone(&right_table)),
                    comp,
                    pattern,
                )
                .unwrap();
                let mut outputs = Vec::new();
                if pattern[0].is_input() {
                    x.set(factory.int(left_input));
                } else {
                    outputs.push(x.clone());
                }
                if pattern[1].is_input() {
                    y.set(factory.int(right_input));
                } else {
                    outputs.push(y.clone());
                }
                let produced = assert_replay_law(&mut generator, &outputs, &factory);
                for tuple in produced {
                    let mut values = tuple.into_iter();
                    let l = if pattern[0].is_input() {
                        factory.int(left_input)
                    } else {
                        values.next().unwrap()
                    };
                    let r = if pattern[1].is_input() {
                        factory.int(right_input)
                    } else {
                        values.next().unwrap()
                    };
                    prop_assert!(comp.holds(l.cmp(&r)), "{} {} {}", l, comp, r);
                }
            }
        }
    }

    #[test]
    fn prop_same_variable_comparison_replay(values in small_values()) {
        let factory = ElementFactory::default();
        let table = sort_of(&factory, &values);
        for comp in CompType::iter() {
            let x = VarCell::new("x");
            let mut generator = ComparisonGenerator::new(
                (x.clone(), Rc::clone(&table)),
                (x.clone(), Rc::clone(&table)),
                comp,
                [Pattern::Output, Pattern::Output],
            )
            .unwrap();
            let produced = assert_replay_law(&mut generator, &[x], &factory);
            let reflexive = comp.holds(std::cmp::Ordering::Equal);
            let expected = if reflexive { table.size() } else { Some(0) };
            prop_assert_eq!(expected, Some(produced.len()));
        }
    }

    #[test]
    fn prop_inverse_abs_replay(values in small_values(), abs in -2i64..5) {
        let factory = Rc::new(ElementFactory::default());
        let (out, operand) = (VarCell::new("out"), VarCell::new("x"));
        let table = sort_of(&factory, &values);
        out.set(factory.int(abs));
        let operand_arg = (operand.clone(), Rc::clone(&table));
        let mut generator = InverseAbsGenerator::new(out, operand_arg, Rc::clone(&factory));
        let produced = assert_replay_law(&mut generator, &[operand], &factory);
        let expected = values
            .iter()
            .filter(|v| v.abs() == abs)
            .collect::<HashSet<&i64>>();
        prop_assert_eq!(expected.len(), produced.len());
    }

    #[test]
    fn prop_chain_replay(left_values in small_values(), right_values in small_values()) {
        let factory = ElementFactory::default();
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let left_table = sort_of(&factory, &left_values);
        let right_table = sort_of(&factory, &right_values);
        let generators: Vec<Box<dyn CloneableGenerator>> = vec![
            Box::new(SortInstGenerator::new(x.clone(), Rc::clone(&left_table)).unwrap()),
            Box::new(
                ComparisonGenerator::new(
                    (x.clone(), Rc::clone(&left_table)),
                    (y.clone(), Rc::clone(&right_table)),
                    CompType::Lt,
                    [Pattern::Input, Pattern::Output],
                )
                .unwrap(),
            ),
        ];
        let mut chain = ChainGenerator::new(generators);
        let produced = assert_replay_law(&mut chain, &[x, y], &factory);
        let left = left_values.iter().collect::<HashSet<&i64>>();
        let right = right_values.iter().collect::<HashSet<&i64>>();
        let expected = left
            .iter()
            .map(|l| right.iter().filter(|r| l < r).count())
            .sum::<usize>();
        prop_assert_eq!(expected, produced.len());
    }

    #[test]
    fn prop_true_quant_kernel_replay(values in small_values(), pairs in small_pairs()) {
        let factory = Rc::new(ElementFactory::default());
        let (x, y) = (VarCell::new("x"), VarCell::new("y"));
        let table = pairs_of(&factory, &pairs);
        let sort = sort_of(&factory, &values);
        let inner = |factory: &Rc<ElementFactory>| -> Box<dyn CloneableGenerator> {
            let generators: Vec<Box<dyn CloneableGenerator>> = vec![
                Box::new(SortInstGenerator::new(x.clone(), Rc::clone(&sort)).unwrap()),
                lookup_generator(
                    Rc::clone(&table),
                    &small_universe(factory),
                    &[Pattern::Input, Pattern::Output],
                    &[x.clone(), y.clone()],
                )
                .unwrap(),
            ];
            Box::new(ChainGenerator::new(generators))
        };
        let mut projection = TrueQuantKernelGenerator::new(inner(&factory), vec![x.clone()]);
        let produced = assert_replay_law(&mut projection, &[x.clone()], &factory);
        let expected = values
            .iter()
            .filter(|v| pairs.iter().any(|(a, b)| a == *v && *a <= 3 && *b <= 3))
            .collect::<HashSet<&i64>>();
        prop_assert_eq!(expected.len(), produced.len());
        let mut closed = TrueQuantKernelGenerator::new(inner(&factory), vec![]);
        let produced = assert_replay_law(&mut closed, &[], &factory);
        prop_assert_eq!(usize::from(!expected.is_empty()), produced.len());
    }
}
