pub mod audio_source;
pub mod input_error;
pub mod outcome;
pub mod segment;
pub mod segment_result;
pub mod segmenter;
