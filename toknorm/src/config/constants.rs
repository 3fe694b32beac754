pub mod compile_time {
    pub mod file_processing {
        /// Maximum raw token dump size allowed for processing (10MB)
        /// SECURITY: Prevents DoS attacks via large file uploads
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a dump "large" (1MB)
        /// PERFORMANCE: Affects processing strategy reporting
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;

        /// Maximum line count for dump analysis
        /// SECURITY: Prevents algorithmic complexity attacks
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = 100_000;
    }

    pub mod raw_stream {
        /// Maximum number of raw token records in a single dump
        /// SECURITY: Prevents DoS via token explosion attacks
        pub const MAX_RAW_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum byte length of a single raw token text
        /// SECURITY: Prevents memory attacks via enormous literals
        pub const MAX_TOKEN_TEXT_SIZE: usize = 1_048_576;
    }

    pub mod normalize {
        /// Maximum depth of nested literal contexts (interpolation/heredocs)
        /// SECURITY: Prevents stack growth attacks via pathological nesting
        pub const MAX_CONTEXT_DEPTH: usize = 100;

        /// Maximum byte length of decoded string content
        /// SECURITY: Limits resource consumption per content token
        pub const MAX_DECODED_CONTENT_SIZE: usize = 1_048_576;
    }

    pub mod logging {
        /// Maximum log events buffered globally
        /// RESOURCE: Prevents unbounded log accumulation
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log events per file before truncation
        /// RESOURCE: Controls memory usage during batch reporting
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Minimum log level for security events (cannot be changed at runtime)
        /// SECURITY: Ensures security events are always logged
        pub const SECURITY_MIN_LOG_LEVEL: u8 = 1; // Warning level minimum
    }
}
