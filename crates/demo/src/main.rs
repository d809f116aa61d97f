//! Lumen demo binary.
//!
//! Builds a small menu whose items support an "alert" action either
//! directly or through a "sub alert" handler, selects some of them and
//! shows what the shell would run and offer in a context menu.

mod menu;

use std::path::PathBuf;

use clap::Parser;
use lumen_menus::menu::{ContextAction, MenuSettings, build_context_menu};
use lumen_menus::{ContextCategoryCache, Executable, Menu, same_item};
use tracing::info;

/// Demo command line arguments.
#[derive(Parser, Debug)]
#[command(name = "lumen-demo")]
#[command(about = "Resolve actions over a demo menu selection")]
struct Args {
	/// Names of items to select (case-insensitive); repeatable
	#[arg(short, long = "select", value_name = "NAME")]
	selected: Vec<String>,

	/// Menu settings file (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::TRACE
		} else {
			tracing::Level::INFO
		})
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let settings = match &args.config {
		Some(path) => MenuSettings::load(path)?,
		None => MenuSettings::default(),
	};

	let demo = menu::DemoActions::new();
	let menu = Menu::new(demo.items(), settings.category_config());
	let _logger = menu.subscribe(|event| tracing::debug!(?event, "menu changed"));

	for name in &args.selected {
		let found = menu
			.member_items()
			.into_iter()
			.find(|item| item.label().eq_ignore_ascii_case(name));
		match found {
			Some(item) => {
				menu.set_selected(&item, true);
			}
			None => tracing::warn!(%name, "no such item"),
		}
	}

	print_menu(&menu);

	let selection = menu.all_selected();
	match menu.resolve(&demo.alert)? {
		Some(result) => result.execute()?,
		None => info!("alert is not available for the selection"),
	}

	let cache = ContextCategoryCache::new();
	let actions: [&dyn ContextAction; 2] = [&demo.alert, &demo.sub_alert];
	let context = build_context_menu(&actions, &selection, &cache)?;
	println!("context menu:");
	print_menu(&context);

	// Sub alert entries carry their own binding, so they can be alerted on again.
	let nested: Vec<_> = context
		.member_items()
		.into_iter()
		.filter(|item| !item.action_bindings().is_empty())
		.collect();
	if let Some(result) = demo.alert.get(&nested)? {
		result.execute()?;
	}

	Ok(())
}

fn print_menu(menu: &Menu) {
	let members = menu.member_items();
	let selected = menu.selected();
	let cursor = menu.cursor();
	for item in menu.items() {
		if !members.iter().any(|member| same_item(member, &item)) {
			println!("  [{}]", item.label());
			continue;
		}
		let at_cursor = cursor.as_ref().is_some_and(|cursor| same_item(cursor, &item));
		let is_selected = selected.iter().any(|s| same_item(s, &item));
		println!(
			"{}{} {}",
			if at_cursor { '>' } else { ' ' },
			if is_selected { '*' } else { ' ' },
			item.label()
		);
	}
}
