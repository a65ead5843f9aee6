//! The layout host: where measurements come from and styles go to.
//!
//! The strategy never reaches into a document directly. Every read and write
//! goes through [`LayoutHost`], so the same code drives a real DOM binding,
//! a native toolkit, or the in-memory [`StaticLayout`] used by tests and the
//! scenario runner.

use std::collections::{HashMap, HashSet};

use crate::element::ElementId;
use crate::position::styles::{CssValue, StyleDeclaration, StyleProperty};
use crate::primitives::{Point, Rect, Size};

/// Measurement and style access for the elements a strategy works with.
///
/// Rects are in client (viewport) coordinates.
pub trait LayoutHost {
    /// Client size of the document, excluding scrollbars.
    fn viewport_size(&self) -> Size;

    /// Current bounding rect of `element`.
    fn bounding_client_rect(&self, element: ElementId) -> Rect;

    /// Merge `styles` into the inline style of `element`.
    ///
    /// `CssValue::Cleared` removes the property.
    fn set_styles(&mut self, element: ElementId, styles: &StyleDeclaration);

    fn add_class(&mut self, element: ElementId, class: &str);

    /// Called with the pane's resolved rect after each application.
    ///
    /// A browser lays the pane out itself and can ignore this. Hosts without
    /// a layout engine use it to move the pane.
    fn place_overlay(&mut self, _pane: ElementId, _rect: Rect) {}
}

/// In-memory layout: fixed rects, recorded styles and classes.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    viewport_size: Size,
    rects: HashMap<ElementId, Rect>,
    styles: HashMap<ElementId, StyleDeclaration>,
    classes: HashMap<ElementId, HashSet<String>>,
}

impl StaticLayout {
    pub fn new(viewport_size: Size) -> Self {
        Self {
            viewport_size,
            ..Default::default()
        }
    }

    /// Place `element` at `rect`, replacing any previous rect.
    pub fn insert(&mut self, element: ElementId, rect: Rect) {
        self.rects.insert(element, rect);
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    /// Move `element` by `offset`, as scrolling would.
    pub fn translate(&mut self, element: ElementId, offset: Point) {
        if let Some(rect) = self.rects.get_mut(&element) {
            *rect = rect.translate(offset);
        }
    }

    pub fn rect(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    /// Inline styles currently set on `element`.
    pub fn styles(&self, element: ElementId) -> Option<&StyleDeclaration> {
        self.styles.get(&element)
    }

    pub fn style(&self, element: ElementId, property: StyleProperty) -> Option<&CssValue> {
        self.styles.get(&element)?.get(&property)
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.classes
            .get(&element)
            .is_some_and(|classes| classes.contains(class))
    }
}

impl LayoutHost for StaticLayout {
    fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    fn bounding_client_rect(&self, element: ElementId) -> Rect {
        // Detached elements measure as an empty rect.
        self.rects.get(&element).copied().unwrap_or(Rect::ZERO)
    }

    fn set_styles(&mut self, element: ElementId, styles: &StyleDeclaration) {
        let current = self.styles.entry(element).or_default();
        for (property, value) in styles {
            match value {
                CssValue::Cleared => {
                    current.shift_remove(property);
                }
                value => {
                    current.insert(*property, value.clone());
                }
            }
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.classes
            .entry(element)
            .or_default()
            .insert(class.to_string());
    }

    fn place_overlay(&mut self, pane: ElementId, rect: Rect) {
        self.rects.insert(pane, rect);
    }
}
