// Copyright 2026 the Laminate Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed-string assembly from text-bearing subtrees.
//!
//! A text container's subtree mixes three kinds of children, classified by
//! component into the [`TextChild`] variants rather than discovered by
//! runtime type checks. Assembly walks the subtree once, flattening raw
//! runs and nested spans into a fragment list and replacing anything else
//! with an attachment placeholder the layout engine can reserve space for.
//!
//! Fragments store a [`ShadowView`] projection of the relevant node, never
//! a node reference: a fragment retained by a measured layout must not keep
//! an entire subtree alive (or form a cycle with its own container).

use crate::node::ShadowNode;
use crate::view::ShadowView;

/// Component name of raw-text leaf nodes.
pub const RAW_TEXT_COMPONENT: &str = "RawText";

/// Component name of nested attributed-text containers.
pub const TEXT_COMPONENT: &str = "Text";

/// Character standing in for an inline attachment, per Unicode convention.
pub const ATTACHMENT_CHARACTER: char = '\u{FFFC}';

/// Optional character attributes, overlaid leaf-most-wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAttributes {
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Font weight, CSS-style 100–900.
    pub font_weight: Option<u16>,
    /// Foreground color, packed RGBA.
    pub foreground_color: Option<u32>,
    /// Line height in points.
    pub line_height: Option<f64>,
}

impl TextAttributes {
    /// Overlays `other` onto `self`: fields set in `other` win.
    pub fn apply(&mut self, other: &TextAttributes) {
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.font_weight.is_some() {
            self.font_weight = other.font_weight;
        }
        if other.foreground_color.is_some() {
            self.foreground_color = other.foreground_color;
        }
        if other.line_height.is_some() {
            self.line_height = other.line_height;
        }
    }
}

/// One run of uniformly attributed text, or an attachment placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// The text run, or [`ATTACHMENT_CHARACTER`] for attachments.
    pub string: String,
    /// Resolved attributes for this run.
    pub attributes: TextAttributes,
    /// Projection of the node this fragment derives from: the enclosing
    /// container for raw runs, the attached node itself for attachments.
    pub parent_view: ShadowView,
}

impl Fragment {
    /// Returns whether this fragment is an attachment placeholder.
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.string.chars().eq([ATTACHMENT_CHARACTER])
    }
}

/// A flattened list of attributed fragments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributedString {
    fragments: Vec<Fragment>,
}

impl AttributedString {
    /// The fragment list in source order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Appends one fragment.
    pub fn append_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Appends all fragments of `other`.
    pub fn append(&mut self, other: AttributedString) {
        self.fragments.extend(other.fragments);
    }

    /// Concatenated text of all fragments.
    #[must_use]
    pub fn string(&self) -> String {
        self.fragments
            .iter()
            .map(|fragment| fragment.string.as_str())
            .collect()
    }

    /// Returns whether there are no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// The kinds of children a text container can hold.
#[derive(Debug)]
pub enum TextChild<'a> {
    /// A raw text run.
    Raw(&'a str),
    /// A nested container contributing its own attributes.
    Nested(&'a ShadowNode),
    /// Any other node, laid out inline as an attachment.
    Attachment(&'a ShadowNode),
}

/// Classifies a child of a text container by component.
#[must_use]
pub fn classify_text_child(node: &ShadowNode) -> TextChild<'_> {
    match node.component_name() {
        RAW_TEXT_COMPONENT => TextChild::Raw(node.props().text.as_deref().unwrap_or("")),
        TEXT_COMPONENT => TextChild::Nested(node),
        _ => TextChild::Attachment(node),
    }
}

/// Assembles the attributed string of `parent`'s subtree.
///
/// `base_attributes` are the attributes in effect at `parent`; nested
/// containers overlay their own on the way down.
#[must_use]
pub fn build_attributed_string(
    base_attributes: &TextAttributes,
    parent: &ShadowNode,
) -> AttributedString {
    let mut attributed_string = AttributedString::default();

    for child in parent.children() {
        match classify_text_child(child) {
            TextChild::Raw(text) => {
                attributed_string.append_fragment(Fragment {
                    string: text.to_owned(),
                    attributes: base_attributes.clone(),
                    parent_view: ShadowView::from(parent),
                });
            }
            TextChild::Nested(nested) => {
                let mut local_attributes = base_attributes.clone();
                local_attributes.apply(&nested.props().text_attributes);
                attributed_string.append(build_attributed_string(&local_attributes, nested));
            }
            TextChild::Attachment(attachment) => {
                attributed_string.append_fragment(Fragment {
                    string: ATTACHMENT_CHARACTER.to_string(),
                    attributes: base_attributes.clone(),
                    parent_view: ShadowView::from(attachment),
                });
            }
        }
    }

    attributed_string
}
