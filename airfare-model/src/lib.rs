pub mod artifact;
pub mod ensemble;
pub mod pipeline;
pub mod network;
pub mod binarizer;

pub use artifact::load_json_artifact;
pub use ensemble::{RegressionTree, TreeEnsemble, TreeNode};
pub use pipeline::{ColumnTransform, PipelineColumn, TreePipeline};
pub use network::{Activation, FeedForwardNetwork};
pub use binarizer::CabinBinarizer;
