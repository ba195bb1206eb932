use std::path::Path;

use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::audio_writer::AudioWriter;

/// Exports a PCM buffer as a canonical WAV file using ffmpeg-next.
///
/// Output is 16-bit little-endian PCM, mono, at the buffer's sample rate —
/// the container every recognition backend in the pipeline accepts.
pub struct FfmpegAudioWriter;

impl AudioWriter for FfmpegAudioWriter {
    fn write_audio(
        &self,
        path: &Path,
        audio: &AudioBuffer,
    ) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::PCM_S16LE)
            .ok_or("PCM encoder not found")?;

        let mut octx = ffmpeg_next::format::output(&path)?;
        let mut ost = octx.add_stream(Some(codec))?;
        let stream_idx = ost.index();

        let mut encoder = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .audio()?;
        encoder.set_rate(audio.sample_rate() as i32);
        encoder.set_channel_layout(ffmpeg_next::ChannelLayout::MONO);
        encoder.set_format(ffmpeg_next::format::Sample::I16(
            ffmpeg_next::format::sample::Type::Packed,
        ));

        let mut encoder = encoder.open_as(codec)?;
        ost.set_parameters(&encoder);

        let enc_time_base = encoder.time_base();
        let frame_size = encoder.frame_size() as usize;
        let effective_frame_size = if frame_size == 0 { 1024 } else { frame_size };

        octx.write_header()?;
        let ost_time_base = octx.stream(stream_idx).ok_or("Missing output stream")?.time_base();

        let mut pts: i64 = 0;
        for chunk in audio.samples().chunks(effective_frame_size) {
            let mut frame = ffmpeg_next::util::frame::audio::Audio::new(
                ffmpeg_next::format::Sample::I16(ffmpeg_next::format::sample::Type::Packed),
                chunk.len(),
                ffmpeg_next::ChannelLayout::MONO,
            );
            frame.set_rate(audio.sample_rate());
            frame.set_pts(Some(pts));

            fill_i16_frame(&mut frame, chunk);

            encoder.send_frame(&frame)?;
            flush_packets(&mut encoder, &mut octx, stream_idx, enc_time_base, ost_time_base)?;

            pts += chunk.len() as i64;
        }

        encoder.send_eof()?;
        flush_packets(&mut encoder, &mut octx, stream_idx, enc_time_base, ost_time_base)?;

        octx.write_trailer()?;
        Ok(())
    }
}

/// Convert f32 samples to i16 and copy them into the frame's data plane.
fn fill_i16_frame(frame: &mut ffmpeg_next::util::frame::audio::Audio, samples: &[f32]) {
    let dst = frame.data_mut(0);
    for (i, sample) in samples.iter().enumerate() {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        dst[i * 2..i * 2 + 2].copy_from_slice(&value.to_le_bytes());
    }
}

fn flush_packets(
    encoder: &mut ffmpeg_next::codec::encoder::audio::Encoder,
    octx: &mut ffmpeg_next::format::context::Output,
    stream_idx: usize,
    enc_time_base: ffmpeg_next::Rational,
    ost_time_base: ffmpeg_next::Rational,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut encoded = ffmpeg_next::Packet::empty();
    while encoder.receive_packet(&mut encoded).is_ok() {
        encoded.set_stream(stream_idx);
        encoded.rescale_ts(enc_time_base, ost_time_base);
        encoded.write_interleaved(octx)?;
    }
    Ok(())
}
