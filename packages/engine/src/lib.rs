//! # Parametric SVG Engine
//!
//! Evaluates parametric SVG documents: parameter and expression
//! declarations embedded in the markup are bound into a fresh scripting
//! context each cycle, derived values are reconciled back into the
//! parameter store, and every namespaced substitution directive in the tree
//! is rewritten with freshly computed content before the document is
//! serialized for an external renderer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parametric_engine::ParametricSvg;
//!
//! let mut svg = ParametricSvg::new();
//! svg.set_content(r#"
//!     <svg>
//!       <defs><parametric:default param="w" value="10" min="0" max="20"/></defs>
//!       <rect parametric:width="w*2" width="0"/>
//!     </svg>
//! "#)?;
//! svg.update_by_parameter("w", 15.0);
//! let markup = svg.regenerated_markup();
//! ```

pub mod declarations;
pub mod error;
pub mod evaluator;
pub mod expressions;
pub mod params;
pub mod substitution;
pub mod svg;

pub use error::{EngineError, EngineResult};
pub use evaluator::EvalCycle;
pub use expressions::{Expression, ExpressionRegistry};
pub use params::{ParamValue, Parameter, ParameterStore, ValueKind, DEFAULT_MAX, DEFAULT_MIN};
pub use svg::{ParametricSvg, Renderer, DEFAULT_NAMESPACE};
