//! WebGPU rendering module
//!
//! The scene is a flat list of vertex-colored triangles built on the CPU
//! every frame; the GPU side is a single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
