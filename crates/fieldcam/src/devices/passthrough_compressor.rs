use fieldcam_core::{CompressedArtifact, CompressionEngine, CompressionJob, EventSink};

use std::path::{Path, PathBuf};

use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::{debug, info, instrument};

const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Compression engine that re-muxes nothing: it copies the raw clip in
/// chunks and reports progress as bytes move.
pub struct PassthroughCompressor {
    output_dir: PathBuf,
    chunk_size: usize,
}

impl PassthroughCompressor {
    pub(crate) fn new(output_dir: PathBuf) -> Self {
        Self::with_chunk_size(output_dir, DEFAULT_CHUNK_SIZE)
    }

    pub(crate) fn with_chunk_size(output_dir: PathBuf, chunk_size: usize) -> Self {
        Self {
            output_dir,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl CompressionEngine for PassthroughCompressor {
    #[instrument(
        skip(self, job, sink),
        fields(
            session_id = %sink.session_id(),
            quality = %job.quality,
            max_dimension = job.quality.max_dimension,
            fps = job.quality.target_fps,
        )
    )]
    fn compress(&self, job: CompressionJob, sink: EventSink) {
        let extension = job
            .raw
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("mp4")
            .to_string();
        let dest = self.output_dir.join(format!(
            "clip_{}_{}.{}",
            sink.session_id(),
            job.quality.label,
            extension
        ));
        let chunk_size = self.chunk_size;

        info!(raw = ?job.raw.path, dest = ?dest, "Compression started");

        tokio::spawn(async move {
            let result = copy_with_progress(&job.raw.path, &dest, chunk_size, &sink)
                .await
                .map(|size_bytes| CompressedArtifact {
                    path: dest,
                    size_bytes,
                })
                .map_err(|e| e.to_string());
            sink.compression_finished(result);
        });
    }
}

async fn copy_with_progress(
    src: &Path,
    dest: &Path,
    chunk_size: usize,
    sink: &EventSink,
) -> std::io::Result<u64> {
    let total = tokio::fs::metadata(src).await?.len();

    if let Some(dir) = dest.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    let mut reader = File::open(src).await?;
    let mut writer = File::create(dest).await?;
    let mut buf = vec![0u8; chunk_size];
    let mut copied: u64 = 0;
    let mut reported: u8 = 0;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
        copied += n as u64;

        let percent = if total == 0 {
            100
        } else {
            u8::try_from((copied * 100 / total).min(100)).unwrap_or(100)
        };
        if percent > reported {
            reported = percent;
            sink.progress(percent);
        }
    }

    writer.flush().await?;

    debug!(dest = ?dest, copied, "Compressed clip written");

    Ok(copied)
}
