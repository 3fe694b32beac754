/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub supports_file_processing: bool,
    pub supports_raw_stream_parsing: bool,
    pub supports_normalization: bool,
    pub max_file_size: u64,
    pub supported_extensions: Vec<String>,
    pub global_logging_enabled: bool,
    pub error_collection_enabled: bool,
    pub cargo_style_output: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Token Normalization Pipeline:\n\
             - Pipeline Stages: {}\n\
             - File Processing: {}\n\
             - Raw Stream Parsing: {}\n\
             - Normalization: {}\n\
             - Max File Size: {} MB\n\
             - Supported Extensions: {}\n\
             - Global Logging: {}\n\
             - Error Collection: {}\n\
             - Cargo-style Output: {}",
            self.pipeline_stages,
            self.supports_file_processing,
            self.supports_raw_stream_parsing,
            self.supports_normalization,
            self.max_file_size / (1024 * 1024),
            self.supported_extensions.join(", "),
            self.global_logging_enabled,
            self.error_collection_enabled,
            self.cargo_style_output
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        pipeline_stages: 3,
        supports_file_processing: true,
        supports_raw_stream_parsing: true,
        supports_normalization: true,
        max_file_size: crate::file_processor::get_max_file_size(),
        supported_extensions: vec!["json".to_string()],
        global_logging_enabled: true,
        error_collection_enabled: true,
        cargo_style_output: true,
    }
}
