//! Prompt construction for the two generation request kinds
//!
//! Pure functions: goal and milestone strings are interpolated verbatim into
//! the instructional text. No escaping is attempted - the consumer is a
//! natural-language model, not a strict parser.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::domain::{Milestone, ReferenceImage};
use crate::genai::{ContentPart, InlineImage};

/// Build the "expand goal into milestones" prompt
///
/// Parts in order: the reference image (if any), then one instructional text
/// part. The text encodes the series rules: exactly 3 boosters, the first
/// two foundational, the third representing achievement of the goal itself,
/// each described as `Title:` / `Description:` text followed by one image.
pub fn milestone_prompt(goal: &str, reference_image: Option<&ReferenceImage>) -> Vec<ContentPart> {
    let mut parts = Vec::new();

    if let Some(image) = reference_image {
        parts.push(ContentPart::InlineImage(InlineImage::new(
            BASE64.encode(&image.data),
            image.mime_type.clone(),
        )));
    }

    parts.push(ContentPart::text(format!(
        r#"You are a master card designer for the TCG "Chop Chop Booster". Your job is to design a new 'Series' based on a user's goal.
A Series contains 3 themed 'Boosters'.
Your tone should be exciting, like a real TCG designer announcing a new set.
The user's goal for this Series is: "{goal}".

Here are the rules for the Boosters:
- The first two Boosters are the build-up steps, providing foundational skills for the Series theme.
- The third and final Booster MUST represent the achievement of the original goal itself. Its title should be the epic conclusion to the Series.

For EACH of the 3 Boosters:
1.  Provide a short, epic title for the Booster, starting with "Title:".
2.  Provide a concise, thematic description of what's inside, starting with "Description:".
3.  Generate vibrant, exciting wrapper art for the Booster. The art should look like a real TCG booster pack with minimal to no text. Use a solid black or white background so that the frontend can mask it out for transparency. For the final Booster, the art should be a beautiful representation of the completed goal: "{goal}".

Structure your response by alternating between text descriptions (Title and Description) and the corresponding generated image for each Booster."#
    )));

    parts
}

/// Build the "expand milestone into tasks" prompt
///
/// A single text part asking for exactly 3 cards, each as a `Title:` line
/// (example form "Card: <action>"), a `Details:` numbered list of 2-3
/// actionable steps, and one image.
pub fn task_prompt(milestone: &Milestone, series_theme: &str) -> Vec<ContentPart> {
    vec![ContentPart::text(format!(
        r#"You are a master card designer for the TCG "Chop Chop Booster".
The user is opening a Booster from the "{series_theme}" Series called: "{title}".

Your job is to create the 3 collectible "Cards" found inside this Booster.
For EACH of the 3 Cards:
1.  Provide a clear, action-oriented title. Start this line with "Title:". (e.g., "Card: Gather Components", "Card: Assemble the Base").
2.  Provide a numbered list of 2-3 simple, actionable details, like the rules text on a card. Start this section with "Details:".
3.  Generate simple, clear, and thematic card art. The illustration should be a visual cue for the card's action, with minimal to no text. Use a solid black or white background so that the frontend can mask it out for transparency.

Structure your response by alternating between the text block (Title and Details) and the corresponding generated image for each Card."#,
        title = milestone.title,
    ))]
}
