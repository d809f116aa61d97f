use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn context_category_describes_its_ratio() {
	let category = create_context_category(2, 5);

	assert_eq!(category.name(), "Context menu category 2/5");
	assert_eq!(
		category.description(),
		"The category for context menu items indicating how many are correct"
	);
	assert_eq!(category.item().label(), "2/5");
	assert!(category.bindings().is_empty());
}

#[test]
fn cache_returns_the_same_category_for_the_same_pair() {
	let cache = ContextCategoryCache::new();

	let first = cache.get(2, 5);
	let second = cache.get(2, 5);
	assert!(Rc::ptr_eq(&first, &second));
	assert_eq!(cache.len(), 1);
}

#[test]
fn cache_keys_on_both_count_and_total() {
	let cache = ContextCategoryCache::new();

	let a = cache.get(2, 5);
	let b = cache.get(2, 6);
	let c = cache.get(3, 5);
	assert!(!Rc::ptr_eq(&a, &b));
	assert!(!Rc::ptr_eq(&a, &c));
	assert_eq!(b.item().label(), "2/6");
	assert_eq!(c.item().label(), "3/5");
	assert_eq!(cache.len(), 3);
}

#[test]
fn cleared_cache_builds_fresh_categories() {
	let cache = ContextCategoryCache::new();
	let before = cache.get(1, 1);

	cache.clear();
	assert!(cache.is_empty());

	let after = cache.get(1, 1);
	assert!(!Rc::ptr_eq(&before, &after));
	assert_eq!(before.name(), after.name());
}

#[test]
fn separate_caches_do_not_share_entries() {
	let left = ContextCategoryCache::new();
	let right = ContextCategoryCache::new();

	assert!(!Rc::ptr_eq(&left.get(1, 2), &right.get(1, 2)));
}

#[test]
fn category_identity_is_by_reference() {
	let a = Category::new("Files", "").into_ref();
	let b = Category::new("Files", "").into_ref();

	assert!(same_category(Some(&a), Some(&a.clone())));
	assert!(!same_category(Some(&a), Some(&b)));
	assert!(same_category(None, None));
	assert!(!same_category(Some(&a), None));
	assert_eq!(a.item().label(), "Files");
}
