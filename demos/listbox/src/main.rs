//! listbox - a selectable list widget built with strut.
//!
//! Demonstrates the whole surface against the in-memory host tree:
//! definitions and extension, declarative event delegation, option
//! promotion, and the composed emitter capability.

use std::rc::Rc;

use strut::prelude::*;
use strut_core::ElementTree;
use strut_dom::{as_shared, dispatch, InMemoryTree, LocalEmitter};

/// A `ul.listbox` that renders one `li.item` per label and tracks the
/// selected item with `aria-selected`.
fn item_list() -> Definition {
    Definition::base().extend(
        Overrides::new()
            .tag_name("ul")
            .class_name("listbox")
            .events(EventMap::new().on("click .item", "on_select"))
            .initialize(|view, options| {
                let Some(labels) = options
                    .get("labels")
                    .and_then(|value| value.as_data())
                    .and_then(|data| data.downcast_ref::<Vec<String>>())
                else {
                    return;
                };
                let tree = view.tree();
                let mut tree = tree.borrow_mut();
                for label in labels {
                    let item = tree.create_element("li");
                    tree.set_attribute(item, "class", "item");
                    tree.set_attribute(item, "label", label);
                    tree.append_child(view.el(), item);
                }
            })
            .method("on_select", |view, event| {
                let tree = view.tree();
                for item in view.query(".item") {
                    tree.borrow_mut()
                        .set_attribute(item, "aria-selected", "false");
                }
                tree.borrow_mut()
                    .set_attribute(event.target, "aria-selected", "true");
                view.trigger("select");
            }),
    )
}

fn main() {
    let _ = tracing_subscriber::fmt::try_init();

    let tree = InMemoryTree::shared();
    let shared = as_shared(&tree);
    let body = tree.borrow_mut().create_element("body");

    let emitter = LocalEmitter::shared();
    let labels: Vec<String> = ["alpha", "beta", "gamma"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // Derive a list type that decorates the inherited selection
    // behavior instead of replacing it.
    let list_def = item_list();
    let action_list = list_def.extend(Overrides::new().method("on_select", |view, event| {
        if let Some(inherited) = view.definition().super_method("on_select") {
            inherited(view, event);
        }
        tracing::info!("{} changed selection", view.cid());
    }));

    let list = action_list
        .build_with(
            &shared,
            emitter.clone(),
            Options::new().with("labels", OptionValue::Data(Rc::new(labels))),
        )
        .expect("listbox declares every handler it names");
    tree.borrow_mut().append_child(body, list.el());

    list.on(
        "select",
        Rc::new(|| tracing::info!("select event published")),
    );

    let items = list.query(".item");
    tracing::info!(
        "mounted {} with {} items and {} subscriptions",
        list.cid(),
        items.len(),
        list.subscriptions().len()
    );

    dispatch(&tree, items[0], "click");
    dispatch(&tree, items[2], "click");

    {
        let t = tree.borrow();
        for item in &items {
            tracing::info!(
                "{}: selected={}",
                t.attribute(*item, "label").unwrap_or("?"),
                t.attribute(*item, "aria-selected").unwrap_or("false")
            );
        }
    }

    // Dispose cleanly: release subscriptions, then detach the element.
    list.undelegate_events();
    list.remove();
    let remaining = tree.borrow().total_listeners();
    tracing::info!("listbox removed, {remaining} live listeners remain");
}
