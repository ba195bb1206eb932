pub mod infrastructure;
pub mod pipeline_logger;
pub mod segment_worker;
pub mod transcribe_audio_use_case;
pub mod transcriber_pool;
