pub mod threaded_transcriber_pool;
