//! Prompt construction for page generation.

/// Logical width of the generated page.
pub const PAGE_WIDTH_PX: u32 = 1080;

/// Logical height of the generated page.
pub const PAGE_HEIGHT_PX: u32 = 720;

/// Build the single prompt sent to the provider for `description`.
///
/// The provider is told to answer with bare markup so the reply can be
/// written to disk unchanged.
pub fn build_page_prompt(description: &str) -> String {
    format!(
        "Generate complete, valid HTML code for a {PAGE_WIDTH_PX}x{PAGE_HEIGHT_PX}px webpage \
         based on this description:\n\n\
         {description}\n\n\
         Return ONLY the HTML code, no explanations or markdown formatting. \
         The HTML should be complete and ready to save as a .html file."
    )
}
