// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen wrapper: safe-area padding and status bar setup.
//!
//! The wrapper is host-agnostic. The host UI framework supplies the device
//! safe-area insets and applies the status bar configuration; the wrapper
//! only decides which edges get padded and what the status bar looks like.

use serde::{Deserialize, Serialize};

/// One side of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    fn bit(self) -> u8 {
        match self {
            Edge::Top => 1,
            Edge::Bottom => 1 << 1,
            Edge::Left => 1 << 2,
            Edge::Right => 1 << 3,
        }
    }
}

/// Subset of edges that receive safe-area padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSet(u8);

impl EdgeSet {
    pub const NONE: EdgeSet = EdgeSet(0);
    pub const ALL: EdgeSet = EdgeSet(0b1111);

    pub fn contains(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    pub fn with(self, edge: Edge) -> Self {
        EdgeSet(self.0 | edge.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every one of the 16 possible subsets, from empty to all four.
    pub fn all_subsets() -> impl Iterator<Item = EdgeSet> {
        (0u8..16).map(EdgeSet)
    }

    pub fn iter(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |e| self.contains(*e))
    }
}

impl Default for EdgeSet {
    fn default() -> Self {
        EdgeSet::ALL
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        iter.into_iter().fold(EdgeSet::NONE, EdgeSet::with)
    }
}

impl<const N: usize> From<[Edge; N]> for EdgeSet {
    fn from(edges: [Edge; N]) -> Self {
        edges.into_iter().collect()
    }
}

/// Device safe-area insets in layout points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl SafeAreaInsets {
    pub fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }
}

/// Container padding, serialized with the style keys the app uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
}

impl Padding {
    /// Padding equal to the inset on included edges, zero elsewhere.
    pub fn from_insets(insets: &SafeAreaInsets, edges: EdgeSet) -> Self {
        let pick = |edge| {
            if edges.contains(edge) {
                insets.get(edge)
            } else {
                0.0
            }
        };
        Self {
            padding_top: pick(Edge::Top),
            padding_bottom: pick(Edge::Bottom),
            padding_left: pick(Edge::Left),
            padding_right: pick(Edge::Right),
        }
    }
}

/// Status bar content colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusBarStyle {
    #[default]
    #[serde(rename = "light-content")]
    LightContent,
    #[serde(rename = "dark-content")]
    DarkContent,
    #[serde(rename = "default")]
    Default,
}

/// What the host should apply to the system status bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBarConfig {
    pub bar_style: StatusBarStyle,
    pub background_color: String,
    /// Content draws under the bar; true whenever the background is transparent
    pub translucent: bool,
}

/// Host side of the status bar.
pub trait StatusBarHost {
    fn apply_status_bar(&mut self, config: &StatusBarConfig);
}

/// Full-bleed container style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStyle {
    pub flex: f64,
    #[serde(flatten)]
    pub padding: Padding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedScreen<C> {
    pub container: ContainerStyle,
    pub children: C,
}

const TRANSPARENT: &str = "transparent";

/// Wraps screen content with safe-area padding and a configured status bar.
#[derive(Debug, Clone)]
pub struct ScreenWrapper<C> {
    children: C,
    status_bar_style: StatusBarStyle,
    status_bar_color: String,
    edges: EdgeSet,
    background_color: Option<String>,
}

impl<C> ScreenWrapper<C> {
    /// Wrapper with the defaults: every edge padded, light content on a
    /// transparent status bar.
    pub fn new(children: C) -> Self {
        Self {
            children,
            status_bar_style: StatusBarStyle::default(),
            status_bar_color: TRANSPARENT.to_string(),
            edges: EdgeSet::ALL,
            background_color: None,
        }
    }

    pub fn edges(mut self, edges: impl Into<EdgeSet>) -> Self {
        self.edges = edges.into();
        self
    }

    pub fn status_bar_style(mut self, style: StatusBarStyle) -> Self {
        self.status_bar_style = style;
        self
    }

    pub fn status_bar_color(mut self, color: impl Into<String>) -> Self {
        self.status_bar_color = color.into();
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn status_bar_config(&self) -> StatusBarConfig {
        StatusBarConfig {
            bar_style: self.status_bar_style,
            background_color: self.status_bar_color.clone(),
            translucent: self.status_bar_color == TRANSPARENT,
        }
    }

    /// Apply the status bar through the host and lay out the container.
    pub fn render<H: StatusBarHost>(
        self,
        insets: SafeAreaInsets,
        host: &mut H,
    ) -> RenderedScreen<C> {
        host.apply_status_bar(&self.status_bar_config());

        RenderedScreen {
            container: ContainerStyle {
                flex: 1.0,
                padding: Padding::from_insets(&insets, self.edges),
                background_color: self.background_color,
            },
            children: self.children,
        }
    }
}
