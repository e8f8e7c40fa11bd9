use std::sync::Arc;

use nr_scrappers::ResearchPipeline;

pub struct AppState {
    pub pipeline: Arc<ResearchPipeline>,
}

impl AppState {
    pub fn new(pipeline: ResearchPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
