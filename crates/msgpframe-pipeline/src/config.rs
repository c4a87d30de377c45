use msgpframe_frame::FrameConfig;

/// Controls pipeline buffering and record handling.
///
/// Built once by the caller and shared read-only by every stage of a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Frame codec limits.
    pub frame: FrameConfig,
    /// Initial capacity of the reusable line buffer.
    pub line_buffer_capacity: usize,
    /// Initial capacity of the reusable payload buffer.
    pub payload_buffer_capacity: usize,
    /// When true, lines holding only whitespace are skipped instead of being
    /// rejected as invalid JSON.
    pub skip_blank_lines: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            line_buffer_capacity: 64 * 1024,
            payload_buffer_capacity: 1024 * 1024,
            skip_blank_lines: false,
        }
    }
}
