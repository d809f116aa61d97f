use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::items::{ItemRef, StandardMenuItem};

fn item(name: &str, bindings: Vec<Binding>) -> ItemRef {
	StandardMenuItem::builder(name).bindings(bindings).into_ref()
}

/// Root action that records its inputs verbatim.
fn collect_action() -> Action<String, Vec<String>> {
	Action::new(|data: &[String], _| Ok(data.to_vec()))
}

/// Handler that joins its inputs as `(a,b,...)`.
fn join_handler(parent: &Action<String, Vec<String>>) -> Action<String, String> {
	parent.create_handler(|data: &[String], _| Ok(format!("({})", data.join(","))), None)
}

#[derive(Debug, Clone, PartialEq)]
struct SumResult {
	value: i64,
}

fn sum_actions() -> (Action<i64, SumResult>, Action<i64, i64>) {
	let sum = Action::new(|data: &[i64], _| {
		Ok(SumResult {
			value: data.iter().sum(),
		})
	});
	let adder = sum.create_handler(|data: &[i64], _| Ok(data.iter().sum()), None);
	(sum, adder)
}

#[test]
fn sum_through_handler_reduces_selection() {
	let (sum, adder) = sum_actions();
	let item1 = item("one", vec![adder.create_binding(3, None).into()]);
	let item2 = item("two", vec![adder.create_binding(5, None).into()]);
	let item3 = item("three", vec![adder.create_binding(2, None).into()]);
	let item4 = item("four", vec![]);

	let all = [item1, item2.clone(), item3];
	assert_eq!(sum.get(&all).unwrap(), Some(SumResult { value: 10 }));
	assert_eq!(sum.get(&[item2]).unwrap(), Some(SumResult { value: 5 }));
	assert_eq!(sum.get(&[item4]).unwrap(), None);
}

#[test]
fn direct_bindings_keep_item_order_and_duplicates() {
	let action = collect_action();
	let items = [
		item("a", vec![action.create_binding("x".into(), None).into()]),
		item("b", vec![]),
		item("c", vec![action.create_binding("y".into(), None).into()]),
		item("d", vec![action.create_binding("x".into(), None).into()]),
	];

	assert_eq!(action.get(&items).unwrap(), Some(vec!["x".to_owned(), "y".into(), "x".into()]));
}

#[test]
fn handler_group_takes_position_of_its_first_item() {
	let alert = collect_action();
	let sub_alert = join_handler(&alert);
	let items = [
		item("oranges", vec![sub_alert.create_binding("Oranges".into(), None).into()]),
		item("bob", vec![alert.create_binding("Bob".into(), None).into()]),
		item("poof", vec![sub_alert.create_binding("Poof".into(), None).into()]),
		item("hank", vec![alert.create_binding("Hank".into(), None).into()]),
	];

	assert_eq!(
		alert.get(&items).unwrap(),
		Some(vec!["(Oranges,Poof)".to_owned(), "Bob".into(), "Hank".into()])
	);
}

#[test]
fn sources_track_the_items_behind_each_input() {
	let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
	let recorder = seen.clone();
	let action: Action<String, ()> = Action::new(move |_: &[String], sources| {
		*recorder.borrow_mut() = sources
			.iter()
			.map(|group| group.iter().map(|item| item.label().to_owned()).collect())
			.collect();
		Ok(())
	});
	let handler = action.create_handler(|data: &[String], _| Ok(data.concat()), None);
	let items = [
		item("a", vec![action.create_binding("a".into(), None).into()]),
		item("b", vec![handler.create_binding("b".into(), None).into()]),
		item("c", vec![handler.create_binding("c".into(), None).into()]),
	];

	action.get(&items).unwrap();
	assert_eq!(*seen.borrow(), vec![vec!["a".to_owned()], vec!["b".into(), "c".into()]]);
}

#[test]
fn chains_compose_to_any_depth() {
	let root = collect_action();
	let middle = join_handler(&root);
	let leaf: Action<i32, String> =
		middle.create_handler(|data: &[i32], _| Ok(data.iter().sum::<i32>().to_string()), None);

	let items = [
		item("one", vec![leaf.create_binding(1, None).into()]),
		item("mid", vec![middle.create_binding("m".into(), None).into()]),
		item("two", vec![leaf.create_binding(2, None).into()]),
	];

	// leaf: [1, 2] -> "3"; middle: ["3", "m"] -> "(3,m)"
	assert_eq!(root.get(&items).unwrap(), Some(vec!["(3,m)".to_owned()]));
	assert_eq!(middle.get(&items).unwrap(), Some("(3,m)".to_owned()));
	assert_eq!(leaf.get(&items).unwrap(), Some("3".to_owned()));
}

#[test]
fn every_binding_on_an_item_contributes() {
	let action = collect_action();
	let handler = join_handler(&action);
	let items = [item(
		"many",
		vec![
			action.create_binding("a".into(), None).into(),
			handler.create_binding("h1".into(), None).into(),
			action.create_binding("b".into(), None).into(),
			handler.create_binding("h2".into(), None).into(),
		],
	)];

	assert_eq!(
		action.get(&items).unwrap(),
		Some(vec!["a".to_owned(), "(h1,h2)".into(), "b".into()])
	);
}

#[test]
fn shared_binding_contributes_for_each_item() {
	let action = collect_action();
	let shared: Binding = action.create_binding("same".into(), None).into();
	let items = [item("a", vec![shared.clone()]), item("b", vec![shared.clone()])];

	assert!(items[0].action_bindings()[0].ptr_eq(&items[1].action_bindings()[0]));
	assert_eq!(action.get(&items).unwrap(), Some(vec!["same".to_owned(), "same".into()]));
}

#[test]
fn get_data_runs_core_without_walking_bindings() {
	let action = collect_action();
	let bound = item("bound", vec![action.create_binding("ignored".into(), None).into()]);

	let out = action
		.get_data(&["direct".to_owned()], &[vec![bound]])
		.unwrap();
	assert_eq!(out, vec!["direct".to_owned()]);
}

#[test]
fn binding_tags_default_to_the_creating_node() {
	let root: Action<String, Vec<String>> =
		Action::with_tags(|data: &[String], _| Ok(data.to_vec()), ["context"]);
	let inherited = root.create_handler(|data: &[String], _| Ok(data.concat()), None);
	let overridden = root.create_handler(|data: &[String], _| Ok(data.concat()), Some(TagSet::from(["search"])));

	assert_eq!(root.create_binding("a".into(), None).tags(), root.default_tags());
	assert_eq!(inherited.default_tags(), &TagSet::from(["context"]));
	assert_eq!(inherited.create_binding("b".into(), None).tags(), &TagSet::from(["context"]));
	assert_eq!(overridden.create_binding("c".into(), None).tags(), &TagSet::from(["search"]));

	let explicit = root.create_binding("d".into(), Some(TagSet::from(["pinned", "context"])));
	assert_eq!(explicit.tags(), &TagSet::from(["pinned", "context"]));
}

#[rstest]
#[case::matching(&["context"], Some(vec!["ctx".to_owned()]))]
#[case::any_overlap(&["other", "context"], Some(vec!["ctx".to_owned()]))]
#[case::disjoint(&["search"], None)]
fn tag_filter_excludes_disjoint_bindings(
	#[case] requested: &[&'static str],
	#[case] expected: Option<Vec<String>>,
) {
	let action = collect_action();
	let items = [
		item("ctx", vec![action.create_binding("ctx".into(), Some(TagSet::from(["context"]))).into()]),
		item("plain", vec![action.create_binding("plain".into(), None).into()]),
	];
	let requested: TagSet = requested.iter().copied().collect();

	assert_eq!(action.get_with_tags(&items, &requested).unwrap(), expected);
}

#[test]
fn tag_filter_applies_inside_handler_chains() {
	let action = collect_action();
	let handler = join_handler(&action);
	let items = [
		item("a", vec![handler.create_binding("a".into(), Some(TagSet::from(["context"]))).into()]),
		item("b", vec![handler.create_binding("b".into(), None).into()]),
	];

	let context = TagSet::from(["context"]);
	assert_eq!(action.get_with_tags(&items, &context).unwrap(), Some(vec!["(a)".to_owned()]));
	assert_eq!(action.get(&items).unwrap(), Some(vec!["(a,b)".to_owned()]));
}

#[test]
fn core_faults_propagate_unchanged() {
	let action: Action<i64, i64> = Action::new(|_: &[i64], _| Ok(0));
	let failing = action.create_handler(|_: &[i64], _| Err(ActionFault::failed("overflow")), None);
	let items = [item("a", vec![failing.create_binding(1, None).into()])];

	match action.get(&items) {
		Err(ActionFault::Failed(message)) => assert_eq!(message, "overflow"),
		other => panic!("expected handler fault, got {other:?}"),
	}
}

#[test]
fn applicability_counts_items_not_bindings() {
	let action = collect_action();
	let handler = join_handler(&action);
	let items = [
		item("a", vec![action.create_binding("a".into(), None).into(), action.create_binding("b".into(), None).into()]),
		item("b", vec![handler.create_binding("c".into(), None).into()]),
		item("c", vec![]),
	];

	assert!(action.is_applicable(&items));
	assert_eq!(action.applicable_count(&items), 2);
	assert_eq!(handler.applicable_count(&items), 1);
	assert!(!action.is_applicable(&items[2..]));
}

#[test]
fn tagged_applicability_matches_tagged_resolution() {
	let action = collect_action();
	let handler = join_handler(&action);
	let items = [
		item("a", vec![action.create_binding("a".into(), Some(TagSet::from(["context"]))).into()]),
		item("b", vec![handler.create_binding("b".into(), Some(TagSet::from(["search"]))).into()]),
		item("c", vec![handler.create_binding("c".into(), Some(TagSet::from(["context", "search"]))).into()]),
	];
	let context = TagSet::from(["context"]);

	assert_eq!(action.applicable_count(&items), 3);
	assert_eq!(action.applicable_count_with_tags(&items, &context), 2);
	assert_eq!(handler.applicable_count_with_tags(&items, &context), 1);
	assert!(!action.is_applicable_with_tags(&items[1..2], &context));
	assert!(action.is_applicable_with_tags(&items, &TagSet::from(["search"])));
	assert_eq!(
		action.get_with_tags(&items, &context).unwrap(),
		Some(vec!["a".to_owned(), "(c)".to_owned()])
	);
}

#[test]
fn binding_to_a_temporary_handler_never_resolves() {
	let action = collect_action();
	let binding = join_handler(&action).create_binding("lost".into(), None);
	let items = [item("a", vec![binding.into()])];

	assert!(!action.is_applicable(&items));
	assert_eq!(action.get(&items).unwrap(), None);
}

#[test]
fn bindings_of_dropped_handlers_are_skipped() {
	let action = collect_action();
	let items = {
		let handler = join_handler(&action);
		[
			item("gone", vec![handler.create_binding("gone".into(), None).into()]),
			item("kept", vec![action.create_binding("kept".into(), None).into()]),
		]
	};

	assert_eq!(action.get(&items).unwrap(), Some(vec!["kept".to_owned()]));
}

#[test]
fn ancestry_is_tracked_root_first() {
	let root = collect_action();
	let middle = join_handler(&root);
	let leaf: Action<String, String> = middle.create_handler(|data: &[String], _| Ok(data.concat()), None);

	assert!(root.is_root());
	assert_eq!(root.ancestors(), &[] as &[ActionId]);
	assert_eq!(leaf.ancestors(), &[root.id(), middle.id()]);
	assert!(root.is_ancestor_of(&leaf));
	assert!(middle.is_ancestor_of(&leaf));
	assert!(!leaf.is_ancestor_of(&root));
	assert!(!root.is_ancestor_of(&root));
	assert_ne!(root.id(), middle.id());
}

thread_local! {
	static NESTED: RefCell<Option<ItemRef>> = const { RefCell::new(None) };
}

#[test]
fn recursive_handler_binds_itself_in_its_results() {
	let alert: Action<String, ExecutableResult> = Action::new(|data: &[String], _| {
		let text = data.join(",");
		Ok(ExecutableResult::new(move || {
			tracing::info!(%text, "alert");
			Ok(())
		}))
	});
	let sub_alert = alert.create_recursive_handler(
		|this: &WeakAction<String, String>| {
			let this = this.clone();
			move |data: &[String], _: &[Vec<ItemRef>]| -> Result<String> {
				let text = format!("({})", data.join(","));
				// The nested item re-binds the handler for a follow-up menu.
				let nested = StandardMenuItem::builder("Sub Alert")
					.binding(this.create_binding(format!("Meta alert! {text}"), None))
					.into_ref();
				NESTED.with(|slot| *slot.borrow_mut() = Some(nested));
				Ok(text)
			}
		},
		None,
	);

	let items = [item("oranges", vec![sub_alert.create_binding("Oranges".into(), None).into()])];
	assert_eq!(sub_alert.get(&items).unwrap(), Some("(Oranges)".to_owned()));

	let nested = NESTED.with(|slot| slot.borrow_mut().take()).expect("core stored a nested item");
	assert_eq!(
		sub_alert.get(&[nested.clone()]).unwrap(),
		Some("(Meta alert! (Oranges))".to_owned())
	);
	let result = alert.get(&[nested]).unwrap().expect("alert applies to the nested item");
	assert!(result.execute().is_ok());
	assert!(sub_alert.downgrade().upgrade().is_some());
}

proptest! {
	#[test]
	fn unbound_items_do_not_affect_resolution(
		values in prop::collection::vec(-1000i64..1000, 1..12),
		gaps in prop::collection::vec(0usize..3, 12),
	) {
		let action: Action<i64, Vec<i64>> = Action::new(|data: &[i64], _| Ok(data.to_vec()));

		let mut sparse = Vec::new();
		let mut dense = Vec::new();
		for (value, gap) in values.iter().zip(&gaps) {
			for _ in 0..*gap {
				sparse.push(item("filler", vec![]));
			}
			sparse.push(item("bound", vec![action.create_binding(*value, None).into()]));
			dense.push(item("other", vec![action.create_binding(*value, None).into()]));
		}

		let expected = Some(values.clone());
		prop_assert_eq!(action.get(&sparse).unwrap(), expected.clone());
		prop_assert_eq!(action.get(&dense).unwrap(), expected);
	}

	#[test]
	fn handler_chains_compose(values in prop::collection::vec(-1000i64..1000, 1..12)) {
		let root: Action<i64, Vec<i64>> = Action::new(|data: &[i64], _| Ok(data.to_vec()));
		let handler = root.create_handler(|data: &[i64], _| Ok(data.iter().sum::<i64>()), None);
		let items: Vec<ItemRef> = values
			.iter()
			.map(|value| item("v", vec![handler.create_binding(*value, None).into()]))
			.collect();

		let reduced = handler.get(&items).unwrap().expect("handler applies");
		let direct = root.get_data(&[reduced], &[items.clone()]).unwrap();
		prop_assert_eq!(root.get(&items).unwrap(), Some(direct));
	}
}
