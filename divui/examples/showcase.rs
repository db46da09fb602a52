//! Builds a small page from every widget, pokes at it the way a user would
//! and prints the resulting markup.

use std::fs::File;

use divdom::render::outer_markup;
use divui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug)]
struct Person {
    name: &'static str,
    age: u32,
}

const OPTIONS: &str = r##"[
    {"name": "verbose", "description": "print more"},
    {"name": "zig", "description": "for great justice",
     "params": "zigs,justice", "param_description": "# of zigs moved,amount of justice used"}
]"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("showcase.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let doc = Document::new();
    let page = Container::wrap(&doc, doc.body());

    // People table, sorted by clicking the name header
    let table = Table::new(&doc)?;
    table.add_column("name", "Name")?;
    table.add_column("age", "Age")?;
    if let Some(age) = table.column("age") {
        age.set_comparator(|a: &Row, b: &Row| {
            let years = |r: &Row| r.model::<Person>().map_or(0, |p| p.age);
            years(a).cmp(&years(b))
        });
    }
    for person in [Person { name: "Bob", age: 31 }, Person { name: "Alice", age: 7 }] {
        let row = table.add_row([("name", person.name.to_string()), ("age", person.age.to_string())])?;
        row.set_model(person);
    }
    if let Some(name) = table.column("name") {
        doc.click(name.display_node())?;
    }

    let tabs = TabbedPane::new(&doc)?;
    tabs.add("People", ScrollPane::new(&doc, &table, ScrollPolicy::Auto, ScrollPolicy::Never)?)?;
    tabs.add("About", Label::with_alignment(&doc, "divui showcase", TextAlign::Center))?;
    tabs.set_selected_index(1)?;
    page.add(tabs)?;

    // Context menu over the table rows
    let menu: ContextMenu<Person> = ContextMenu::new(&doc);
    menu.add_item(
        ContextMenuItem::new(&doc, "Greet")
            .with_click_handler(|p: &Person| println!("hello, {}", p.name)),
    )?;
    menu.add_item(
        ContextMenuItem::new(&doc, "Vote").with_enable_predicate(|p: &Person| {
            if p.age < 18 {
                ItemState::Disabled
            } else {
                ItemState::Enabled
            }
        }),
    )?;
    page.add(menu.clone())?;
    menu.show(Person { name: "Alice", age: 7 }, 40, 20);
    doc.click(menu.item(0)?.display_node())?;

    let options = OptionsTable::new(&doc, doc.body(), OptionSpec::list_from_json(OPTIONS)?)?;
    options.set_checked("zig", true);
    options.set_param_value("zig", "zigs", "3");

    println!("{}", outer_markup(&doc, doc.body()));
    println!("{}", serde_json::to_string_pretty(&options.to_json())?);
    println!("page holds {} widgets", page.component_count());
    Ok(())
}
