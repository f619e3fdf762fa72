use std::{
    path::Path,
    process::{Command, Stdio},
};

use crate::{
    animation::policy::{AnimationKind, SLOW_ZOOM_MAX_SCALE},
    compile::plan::{ImageInstruction, PlanInstruction, RenderPlan, RenderProfile},
    foundation::error::{ReelError, ReelResult},
    layout::text::{OverlayAnchor, TextOverlay},
};

/// Process boundary for plan execution. The engine produces a [`RenderPlan`];
/// everything pixel- and sample-level happens behind this trait.
pub trait Encoder {
    /// Render `plan` into a video file at `out_path`.
    fn render(&self, plan: &RenderPlan, out_path: &Path) -> ReelResult<()>;
}

/// Whether a usable `ffmpeg` binary is reachable on PATH.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[derive(Clone, Copy, Debug, Default)]
/// Plan executor backed by the system `ffmpeg` binary.
///
/// We intentionally shell out rather than link `ffmpeg-next`, avoiding native
/// FFmpeg dev header/lib requirements. The whole composite is expressed as a
/// single `-filter_complex` graph so one invocation produces the final file.
pub struct FfmpegEncoder;

impl Encoder for FfmpegEncoder {
    fn render(&self, plan: &RenderPlan, out_path: &Path) -> ReelResult<()> {
        if !is_ffmpeg_on_path() {
            return Err(ReelError::render(
                "ffmpeg is required for rendering, but was not found on PATH",
            ));
        }

        let args = build_args(plan, out_path)?;
        tracing::debug!(args = ?args, "invoking ffmpeg");

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ReelError::render(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::render(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Build the complete ffmpeg argument list for a plan.
///
/// Pure: no filesystem or process access, so the full command line is unit
/// testable. Inputs appear in instruction order; the filter graph composites
/// images over a solid canvas, draws text last, and mixes audio additively.
pub fn build_args(plan: &RenderPlan, out_path: &Path) -> ReelResult<Vec<String>> {
    let duration_s = plan.duration.as_secs_f64();
    if duration_s <= 0.0 {
        return Err(ReelError::render("render plan has zero duration"));
    }

    let mut images: Vec<&ImageInstruction> = Vec::new();
    let mut audio = Vec::new();
    let mut texts: Vec<&TextOverlay> = Vec::new();
    for instruction in &plan.instructions {
        match instruction {
            PlanInstruction::Image(i) => images.push(i),
            PlanInstruction::Audio(a) => audio.push(a),
            PlanInstruction::Text(t) => texts.push(t),
        }
    }
    // Compositing order: lower layers first, then by start within a layer.
    images.sort_by_key(|i| (i.layer, i.span.start));

    let mut args: Vec<String> = vec!["-y".into(), "-loglevel".into(), "error".into()];
    let mut filters: Vec<String> = Vec::new();

    // One input per image instruction: `-loop 1 -t` turns the still into a
    // frame stream covering its span.
    for image in &images {
        args.extend([
            "-loop".into(),
            "1".into(),
            "-t".into(),
            format!("{:.6}", image.span.len().as_secs_f64()),
            "-i".into(),
            image.source.display().to_string(),
        ]);
    }
    let audio_base = images.len();
    for entry in &audio {
        args.extend(["-i".into(), entry.source.display().to_string()]);
    }

    filters.push(format!(
        "color=c=black:s={}x{}:r={}:d={:.6}[base]",
        plan.profile.width, plan.profile.height, plan.profile.fps, duration_s
    ));

    let mut video_label = "base".to_string();
    for (idx, image) in images.iter().enumerate() {
        filters.push(image_chain(image, idx, &plan.profile)?);
        let out = format!("v{idx}");
        // gte*lt keeps the window half-open; between() is inclusive at both
        // ends and would double-enable adjacent clips on the boundary frame.
        filters.push(format!(
            "[{video_label}][img{idx}]overlay=(W-w)/2:(H-h)/2:enable='gte(t,{:.6})*lt(t,{:.6})'[{out}]",
            image.span.start.as_secs_f64(),
            image.span.end.as_secs_f64(),
        ));
        video_label = out;
    }

    if !texts.is_empty() {
        let mut chain = format!("[{video_label}]");
        let draws: Vec<String> = texts.iter().map(|t| drawtext(t)).collect();
        chain.push_str(&draws.join(","));
        chain.push_str("[vtext]");
        filters.push(chain);
        video_label = "vtext".to_string();
    }

    for (idx, entry) in audio.iter().enumerate() {
        let input = audio_base + idx;
        let delay_ms = entry.start.as_millis();
        let len_s = entry.end.saturating_sub(entry.start).as_secs_f64();
        filters.push(format!(
            "[{input}:a]atrim=0:{len_s:.6},asetpts=PTS-STARTPTS,volume={gain},adelay={delay_ms}|{delay_ms}[aud{idx}]",
            gain = entry.gain,
        ));
    }
    if !audio.is_empty() {
        let inputs: String = (0..audio.len()).map(|i| format!("[aud{i}]")).collect();
        filters.push(format!(
            "{inputs}amix=inputs={}:duration=longest:normalize=0[aout]",
            audio.len()
        ));
    }

    args.extend(["-filter_complex".into(), filters.join(";")]);
    args.extend(["-map".into(), format!("[{video_label}]")]);
    if !audio.is_empty() {
        args.extend([
            "-map".into(),
            "[aout]".into(),
            "-c:a".into(),
            plan.profile.audio_codec.clone(),
        ]);
    }
    args.extend([
        "-c:v".into(),
        plan.profile.video_codec.clone(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        plan.profile.fps.to_string(),
        "-t".into(),
        format!("{duration_s:.6}"),
        "-movflags".into(),
        "+faststart".into(),
        out_path.display().to_string(),
    ]);

    Ok(args)
}

/// Per-image filter chain: scale to target size, then the optional entry zoom.
fn image_chain(image: &ImageInstruction, idx: usize, profile: &RenderProfile) -> ReelResult<String> {
    let mut chain = format!("[{idx}:v]scale={}:{},setsar=1", image.width, image.height);

    if let Some(spec) = &image.animation {
        if spec.kind == AnimationKind::SlowZoomIn {
            let anim_frames =
                ((spec.duration.as_secs_f64() * f64::from(profile.fps)).round()).max(1.0);
            let step = (SLOW_ZOOM_MAX_SCALE - 1.0) / anim_frames;
            chain.push_str(&format!(
                ",zoompan=z='min(1+{step:.8}*on,{SLOW_ZOOM_MAX_SCALE})':d=1:\
                 x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={}x{}:fps={}",
                image.width, image.height, profile.fps
            ));
        }
    }

    chain.push_str(&format!("[img{idx}]"));
    Ok(chain)
}

/// One `drawtext` filter term for an overlay, horizontally centered with its
/// anchor-relative vertical placement.
fn drawtext(overlay: &TextOverlay) -> String {
    let y = match overlay.anchor {
        OverlayAnchor::BottomCenter => format!("h-text_h-{}", overlay.margin_px),
        OverlayAnchor::TopCenter => overlay.margin_px.to_string(),
    };
    format!(
        "drawtext=text='{text}':fontsize={size}:fontcolor={color}:bordercolor={border}:\
         borderw={borderw}:x=(w-text_w)/2:y={y}:enable='gte(t,{start:.6})*lt(t,{end:.6})'",
        text = escape_drawtext(&overlay.text),
        size = overlay.font_size_px,
        color = overlay.color,
        border = overlay.stroke_color,
        borderw = overlay.stroke_width_px,
        start = overlay.span.start.as_secs_f64(),
        end = overlay.span.end.as_secs_f64(),
    )
}

/// Escape text for embedding in a single-quoted `drawtext` value.
fn escape_drawtext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\\\\\'"),
            ':' => out.push_str("\\:"),
            '%' => out.push_str("\\%"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
