//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use strut_core::{ElementTree, NodeId, SharedTree};
use strut_dom::{as_shared, InMemoryTree};

/// A small document: `body > div > button.btn * 2`.
pub struct Fixture {
    pub tree: Rc<RefCell<InMemoryTree>>,
    pub shared: SharedTree,
    pub body: NodeId,
    pub panel: NodeId,
    pub buttons: Vec<NodeId>,
}

pub fn fixture() -> Fixture {
    let tree = InMemoryTree::shared();
    let (body, panel, buttons) = {
        let mut t = tree.borrow_mut();
        let body = t.create_element("body");
        let panel = t.create_element("div");
        t.append_child(body, panel);
        let mut buttons = Vec::new();
        for _ in 0..2 {
            let button = t.create_element("button");
            t.set_attribute(button, "class", "btn");
            t.append_child(panel, button);
            buttons.push(button);
        }
        (body, panel, buttons)
    };
    let shared = as_shared(&tree);
    Fixture {
        tree,
        shared,
        body,
        panel,
        buttons,
    }
}

/// Handler invocation log: (view cid, event name, target node).
pub type CallLog = Rc<RefCell<Vec<(String, String, NodeId)>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}
