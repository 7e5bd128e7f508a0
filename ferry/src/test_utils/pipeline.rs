use rand::random;

use crate::destination::Destination;
use crate::pipeline::{Pipeline, PipelineId};
use crate::source::Source;

/// Creates a pipeline with a random id connecting `source` to `destination`.
///
/// Random ids keep the spans of concurrently running test pipelines apart.
pub fn create_pipeline<S, D>(source: S, destination: D) -> Pipeline<S, D>
where
    S: Source + Send + 'static,
    D: Destination + Send + 'static,
{
    let pipeline_id: PipelineId = random();

    Pipeline::new(pipeline_id, source, destination)
}
