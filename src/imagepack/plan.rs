//! Prompt plans: one illustration prompt per analysis slide.

use crate::config::DEFAULT_IMAGE_MODEL;
use crate::convert::write_atomic;
use crate::error::ExportError;
use crate::pipeline::document::AnalysisSection;
use crate::pipeline::images::slide_image_stem;
use crate::pipeline::layout::MAX_ANALYSES;
use crate::pipeline::parse::parse_detailed_analysis;
use crate::pipeline::sections::{extract_title, SectionKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const PLAN_VERSION: u32 = 1;

/// Page number of the first analysis slide in a default deck.
pub const DEFAULT_START_SLIDE: usize = 5;

const DEFAULT_DECK_TITLE: &str = "Deck";

/// Characters of section body quoted in a prompt.
const CONTEXT_CHARS: usize = 260;

/// A list of images to generate, written as JSON between the two steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePlan {
    #[serde(default = "plan_version")]
    pub version: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default = "model_hint")]
    pub model_hint: String,
    #[serde(default)]
    pub images: Vec<PlanItem>,
}

/// One image. Only `prompt` is required when a plan is edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slide_number: usize,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_resolution")]
    pub resolution: String,
    #[serde(default)]
    pub prompt: String,
}

fn plan_version() -> u32 {
    PLAN_VERSION
}
fn model_hint() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}
fn default_size() -> String {
    "16:9".to_string()
}
fn default_resolution() -> String {
    "1K".to_string()
}

impl PlanItem {
    /// Output file stem. Unnamed items become `image-NN`, numbered from 1 by
    /// position in the plan.
    pub fn file_stem(&self, index: usize) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("image-{:02}", index + 1)
        } else {
            name.to_string()
        }
    }
}

/// Palette wording for the theme-factory themes that have one.
pub fn theme_style_hint(theme_slug: &str) -> &'static str {
    match theme_slug.trim().to_lowercase().as_str() {
        "golden-hour" => "warm mustard yellow + terracotta + soft beige palette, cozy but premium",
        "tech-innovation" => {
            "high-contrast dark gray with electric blue and neon cyan accents, sleek modern"
        }
        "ocean-depths" => "deep navy + teal + seafoam palette, clean and trustworthy",
        "modern-minimalist" => "neutral grayscale, minimal, lots of whitespace",
        "midnight-galaxy" => "dark cosmic palette, subtle glow accents",
        _ => "consistent palette matching the deck theme",
    }
}

/// The prompt for one analysis slide.
pub fn prompt_for(deck_title: &str, section: &AnalysisSection, theme_slug: &str) -> String {
    let context: String = section
        .body
        .chars()
        .take(CONTEXT_CHARS)
        .collect::<String>()
        .replace('\n', " ");
    format!(
        "Create a modern editorial illustration for a presentation slide.\n\
         Topic: {deck_title}\n\
         Slide focus: {title}\n\
         Context: {context}\n\
         Style: {style}; flat vector / editorial, subtle grain, clean shapes.\n\
         Composition: subject centered, plenty of negative space around edges, 16:9 friendly.\n\
         Constraints: no text, no captions, no logos, no watermarks, no brand marks.\n\
         Quality: crisp, high detail, professional, not cartoonish.\n",
        title = section.title,
        style = theme_style_hint(theme_slug),
    )
}

/// Build the plan for a report: one item per analysis slide the deck would
/// show, numbered from `start_slide`.
pub fn make_plan(markdown: &str, theme_slug: &str, start_slide: usize) -> ImagePlan {
    let deck_title = extract_title(markdown).unwrap_or_else(|| DEFAULT_DECK_TITLE.to_string());
    let analyses = parse_detailed_analysis(SectionKind::DetailedAnalysis.slice(markdown));

    let images = analyses
        .iter()
        .take(MAX_ANALYSES)
        .enumerate()
        .map(|(i, section)| {
            let slide_number = start_slide + i;
            PlanItem {
                name: slide_image_stem(slide_number),
                slide_number,
                size: default_size(),
                resolution: default_resolution(),
                prompt: prompt_for(&deck_title, section, theme_slug),
            }
        })
        .collect();

    ImagePlan {
        version: PLAN_VERSION,
        theme: theme_slug.to_string(),
        model_hint: model_hint(),
        images,
    }
}

/// Read `input`, plan it and write the plan to `output` as pretty JSON.
pub async fn write_plan(
    input: &Path,
    output: &Path,
    theme_slug: &str,
    start_slide: usize,
) -> Result<ImagePlan, ExportError> {
    let markdown = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| ExportError::from_input_io(input.to_path_buf(), e))?;
    let plan = make_plan(&markdown, theme_slug, start_slide);
    let json = serde_json::to_string_pretty(&plan)
        .map_err(|e| ExportError::Internal(format!("Failed to serialise plan: {e}")))?;
    write_atomic(output, json.as_bytes()).await?;
    info!("Wrote plan with {} image(s) to {}", plan.images.len(), output.display());
    Ok(plan)
}

/// Load a plan written by [`write_plan`] or by hand.
pub async fn read_plan(path: &Path) -> Result<ImagePlan, ExportError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ExportError::from_input_io(path.to_path_buf(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| ExportError::PlanInvalid(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
# Coffee Markets
## Detailed Analysis
### Supply
Weather shocks in **Brazil** tightened supply.
生成日期：2025-03-01

- Arabica up
### Demand
Younger buyers.
## Areas of Consensus
- x
";

    #[test]
    fn one_item_per_analysis_from_start_slide() {
        let plan = make_plan(REPORT, "ocean-depths", DEFAULT_START_SLIDE);
        assert_eq!(plan.version, 1);
        assert_eq!(plan.theme, "ocean-depths");
        assert_eq!(plan.model_hint, DEFAULT_IMAGE_MODEL);
        let names: Vec<_> = plan.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["slide-05", "slide-06"]);
        assert_eq!(plan.images[1].slide_number, 6);
        assert_eq!(plan.images[0].size, "16:9");
        assert_eq!(plan.images[0].resolution, "1K");
    }

    #[test]
    fn prompt_carries_title_focus_context_and_style() {
        let plan = make_plan(REPORT, "ocean-depths", 5);
        let prompt = &plan.images[0].prompt;
        assert!(prompt.contains("Topic: Coffee Markets\n"));
        assert!(prompt.contains("Slide focus: Supply\n"));
        assert!(prompt.contains("Context: Weather shocks in Brazil tightened supply. - Arabica up\n"));
        assert!(prompt.contains("deep navy + teal + seafoam"));
        assert!(prompt.contains("no text, no captions"));
    }

    #[test]
    fn plan_is_capped_like_the_deck() {
        let mut md = String::from("# T\n## Detailed Analysis\n");
        for i in 0..7 {
            md.push_str(&format!("### A{i}\nbody\n"));
        }
        let plan = make_plan(&md, "golden-hour", 3);
        assert_eq!(plan.images.len(), MAX_ANALYSES);
        assert_eq!(plan.images.last().unwrap().name, "slide-07");
    }

    #[test]
    fn context_is_cut_by_characters_not_bytes() {
        let section = AnalysisSection {
            title: "长".into(),
            body: "咖".repeat(400),
        };
        let prompt = prompt_for("T", &section, "x");
        let line = prompt.lines().find(|l| l.starts_with("Context: ")).unwrap();
        assert_eq!(line.trim_start_matches("Context: ").chars().count(), CONTEXT_CHARS);
    }

    #[test]
    fn untitled_report_and_unknown_theme() {
        let plan = make_plan("## Detailed Analysis\n### Only\nx\n", "Custom", 5);
        assert!(plan.images[0].prompt.contains("Topic: Deck\n"));
        assert!(plan.images[0]
            .prompt
            .contains("consistent palette matching the deck theme"));
        assert!(make_plan("# T\n", "golden-hour", 5).images.is_empty());
    }

    #[test]
    fn hand_edited_plan_fills_defaults() {
        let plan: ImagePlan =
            serde_json::from_str(r#"{"images":[{"prompt":"a lighthouse"}]}"#).unwrap();
        assert_eq!(plan.version, PLAN_VERSION);
        let item = &plan.images[0];
        assert_eq!(item.file_stem(0), "image-01");
        assert_eq!(item.size, "16:9");
        assert_eq!(item.slide_number, 0);
    }

    #[tokio::test]
    async fn write_then_read_plan() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.md");
        std::fs::write(&input, REPORT).unwrap();
        let output = dir.path().join("plans/images.json");
        let written = write_plan(&input, &output, "golden-hour", 5).await.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["images"][0]["slide_number"], 5);
        assert_eq!(json["model_hint"], DEFAULT_IMAGE_MODEL);
        assert_eq!(read_plan(&output).await.unwrap(), written);
    }

    #[tokio::test]
    async fn unreadable_plan_is_plan_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = read_plan(&path).await.unwrap_err();
        assert!(matches!(err, ExportError::PlanInvalid(_)), "{err:?}");
    }
}
