/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating complete pipeline configuration");

    // Validate file processor integration
    crate::file_processor::init_file_processor_logging()?;

    // Validate raw stream integration
    crate::raw_stream::init_raw_stream_logging()?;

    // Validate normalization integration and table coherence
    crate::normalize::init_normalize_logging()?;
    crate::normalize::validate_tables()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Complete pipeline validation succeeded",
        "stages_validated" => 3,
        "file_processing" => true,
        "raw_stream_parsing" => true,
        "normalization" => true
    );

    Ok(())
}
