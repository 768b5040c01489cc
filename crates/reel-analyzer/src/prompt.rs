//! Prompt construction for the highlight analyzer.

/// Build the analysis prompt for a timestamped transcript.
///
/// The transcript lines carry `[MM:SS]` markers so the model can quote real
/// timestamps instead of inventing them.
pub fn build_prompt(transcript: &str) -> String {
    format!(
        r#"You are a sports commentary analyst. Identify the most exciting moments in the match from the transcript below: goals, saves, near misses, turning points, crowd eruptions, decisive plays.

IMPORTANT: You must strictly follow this output format.
Return ONLY a single JSON object with this schema:
{{
  "highlights": [
    {{
      "start": 0,
      "end": 0,
      "description": "What happens in this moment",
      "score": 0
    }}
  ]
}}

Here is the TRANSCRIPT of the video with timestamps.
Use these exact timestamps for the 'start' and 'end' fields.

TRANSCRIPT:
{transcript}

Additional instructions:
- Return ONLY a single JSON object and nothing else.
- 'start' and 'end' are seconds from the start of the video (numbers), or "MM:SS" strings quoting the transcript markers. 'start' must be strictly before 'end'.
- 'score' is an integer from 1 (mildly interesting) to 10 (unmissable).
- Extract 3 to 10 moments that are roughly 5-30 seconds long.
- If nothing in the transcript is exciting, return an empty "highlights" list.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_transcript() {
        let prompt = build_prompt("[01:12] What a strike!");
        assert!(prompt.contains("[01:12] What a strike!"));
        assert!(prompt.contains("\"highlights\""));
    }
}
