//! Core types for the Vellum chart controls.
//!
//! This crate provides the pieces the chart engine calls into:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Margin`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - The render target: [`Element`], a tagged node tree that serializes to markup
//! - Theme resolution: [`theme::resolve`]
//! - Interaction plumbing: [`EventBus`], [`Model`], [`ResizeObserver`]

pub mod binding;
mod color;
mod element;
pub mod event;
mod geometry;
pub mod resize;
pub mod theme;

pub use binding::{Change, Model, SubscriptionId};
pub use color::{Color, ColorParseError};
pub use element::{fmt_exact, fmt_num, AttrValue, Element};
pub use event::{ChartEvent, EventBus, EventKind, ListenerId, PointPayload};
pub use geometry::{Margin, Point, Rect, Size};
pub use resize::{Debouncer, ResizeObserver, RESIZE_DEBOUNCE_MS};
pub use theme::{ChartParams, ChartTheme, Palette, SizePreset, ThemeHooks, ThemeSpec};
