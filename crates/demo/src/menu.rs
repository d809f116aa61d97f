//! The demo's actions and items.

use lumen_menus::{
	Action, ActionFault, Executable, ExecutableResult, ItemRef, StandardMenuItem, TagSet,
	WeakAction,
};

/// Data carried by alert bindings.
///
/// Sub alerts also produce a menu item bound back to the sub alert handler,
/// so a context menu entry can itself be alerted on again.
#[derive(Clone)]
pub struct Alert {
	pub message: String,
	pub item: Option<ItemRef>,
}

impl Alert {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			item: None,
		}
	}
}

impl Executable for Alert {
	fn execute(&self) -> Result<(), ActionFault> {
		println!("alert: {}", self.message);
		Ok(())
	}

	fn menu_item(&self) -> Option<ItemRef> {
		self.item.clone()
	}
}

/// Alert and sub alert actions plus the items bound to them.
pub struct DemoActions {
	pub alert: Action<Alert, ExecutableResult>,
	pub sub_alert: Action<Alert, Alert>,
}

impl DemoActions {
	pub fn new() -> Self {
		let alert = Action::with_tags(
			|data: &[Alert], _| {
				let text = join(data);
				let result = ExecutableResult::new(move || {
					println!("alert: {text}");
					Ok(())
				});
				let execute = result.execute_fn();
				let item = StandardMenuItem::builder("Alert All")
					.on_execute(move || execute())
					.into_ref();
				Ok(result.with_menu_item(item))
			},
			TagSet::from(["context"]),
		);

		let sub_alert = alert.create_recursive_handler(
			|this: &WeakAction<Alert, Alert>| {
				let this = this.clone();
				move |data: &[Alert], _: &[Vec<ItemRef>]| -> Result<Alert, ActionFault> {
					let message = format!("({})", join(data));
					let meta = this.create_binding(Alert::new(format!("Meta alert! {message}")), None);
					let item = StandardMenuItem::builder("Sub Alert")
						.on_execute({
							let message = message.clone();
							move || {
								println!("alert: {message}");
								Ok(())
							}
						})
						.binding(meta)
						.into_ref();
					Ok(Alert {
						message,
						item: Some(item),
					})
				}
			},
			None,
		);

		Self { alert, sub_alert }
	}

	pub fn items(&self) -> Vec<ItemRef> {
		let alerting = |name: &str| {
			StandardMenuItem::builder(name)
				.binding(self.alert.create_binding(Alert::new(name), None))
				.into_ref()
		};
		let sub_alerting = |name: &str| {
			StandardMenuItem::builder(name)
				.description("sub alert")
				.binding(self.sub_alert.create_binding(Alert::new(name), None))
				.into_ref()
		};
		vec![
			alerting("Bob"),
			alerting("Hank"),
			alerting("Woof"),
			sub_alerting("Oranges"),
			sub_alerting("Poof"),
			StandardMenuItem::builder("Wow").into_ref(),
		]
	}
}

impl Default for DemoActions {
	fn default() -> Self {
		Self::new()
	}
}

fn join(data: &[Alert]) -> String {
	data.iter()
		.map(|alert| alert.message.as_str())
		.collect::<Vec<_>>()
		.join(",")
}
