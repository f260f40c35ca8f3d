//! Procedural Voronoi patterns rendered as wet relief
//!
//! Generates cellular line patterns and turns them into shaded pseudo-3D
//! images: each cell bulges up between its boundary strokes and catches a
//! wet, specular highlight. Meant for producing paired "flat pattern /
//! shaded relief" image datasets.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_relief::*;
//!
//! let config = PatternConfigBuilder::new()
//!     .seed(42)
//!     .point_count(80).unwrap()
//!     .point_distribution(PointDistribution::Grid)
//!     .wetness(0.9).unwrap()
//!     .build().unwrap();
//!
//! let pattern = ReliefPattern::generate(config).unwrap();
//!
//! pattern.raster().save("pattern.png").unwrap();
//! pattern.rendered().save("relief.png").unwrap();
//! ```
//!
//! # Pipeline
//!
//! 1. [`generate_points`] places seeds (`random` or jittered `grid`).
//! 2. [`build_raster`] strokes the Voronoi boundaries onto a canvas.
//! 3. [`build_height_field`] bulges every cell away from its boundary.
//! 4. [`compute_normals`] takes Sobel gradients of the heights.
//! 5. [`shading`], [`specular`] and [`compose`] light the surface.
//! 6. [`enhance_contrast`] applies the final linear stretch.
//!
//! Every stage is a pure function of its inputs; all randomness comes from
//! explicitly seeded generators.
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration types

// Modules
pub mod config;
pub mod error;
pub mod generation;
pub mod pattern;
pub mod relief;
pub mod shading;

// Re-export core types for convenience
pub use config::{BaseColor, PatternConfig, PatternConfigBuilder, PointDistribution, Rgb};
pub use error::{PatternError, Result};
pub use generation::{build_raster, generate_points, PointField, RasterImage, RasterStyle, SeedPoint};
pub use pattern::{render_relief, Relief, ReliefPattern, RenderedImage};
pub use relief::{
    build_height_field, compute_normals, HeightField, HeightParams, NormalField, ScalarField, SurfaceConfig,
    SurfaceLayer,
};
pub use shading::{
    compose, diffuse, enhance_contrast, invert, shading, specular, LightModel, SpecularModel, VIEW_DIRECTION,
};

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
