#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod hierarchy;
pub mod highlight;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use hierarchy::{HierarchyError, Tree, TreeNode, build_hierarchy, extract_label};
pub use highlight::ancestor_path;
pub use ir::FlatRecord;
pub use layout::{Layout, LinkLayout, NodeLayout, compute_layout};
pub use parser::parse_records;
pub use render::{render_svg, render_svg_highlighted};
pub use theme::Theme;
