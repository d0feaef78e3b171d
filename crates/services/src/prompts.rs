//! Prompt text sent to the backend's question-answering endpoint: the
//! conversational interview and the canned document analysis.

use credit_core::model::Transcript;

/// First assistant turn of every interview.
pub const OPENING_QUESTION: &str = "I'm helping you determine eligibility for 45Q tax credits. To get started, can you tell me about your facility or project? What type of operation is this?";

/// Used when `/assessment-prompt` cannot be loaded.
pub const FALLBACK_ASSESSMENT_PROMPT: &str = "You are an expert 45Q tax credit eligibility assessor. Your job is to determine if a company qualifies for 45Q credits and provide a complete assessment.

IMPORTANT RULES:
- NEVER refer users to tax professionals or external consultants
- ALWAYS provide complete eligibility assessments when you have enough information
- Ask specific, targeted questions based on the 45Q regulations
- Continue asking questions until you can make a definitive determination
- Give comprehensive assessments with clear yes/no eligibility and reasoning

ASSESSMENT PROCESS:
1. Start with general facility information
2. Ask targeted follow-up questions based on responses
3. Continue until you have enough information for a complete assessment
4. Provide a definitive eligibility determination with:
   - Eligible: Yes/No
   - Reasoning based on 45Q regulations
   - Specific provisions that apply
   - Estimated credit amounts if possible
   - Next steps for the company

Remember: You are the expert. Provide complete guidance, don't defer to others.";

/// Asks the knowledge base which eligibility questions its documents call for.
pub const DOCUMENT_ANALYSIS_PROMPT: &str = "Based on the 45Q tax credit documents in your knowledge base, analyze what questions we should ask clients to determine their eligibility.

Please provide:
1. A comprehensive list of eligibility criteria questions
2. Follow-up questions that might be needed based on different facility types
3. Questions about specific requirements for different provisions
4. Any additional questions that would help determine qualification

Focus on making this interactive and thorough.";

/// Which directive to send when asking for the final report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalAssessmentKind {
    /// Issued by the completion policy once the interview has stalled.
    Forced,
    /// Requested explicitly by the user; may run on partial information.
    Manual,
}

/// Prompt asking for the next interview turn.
#[must_use]
pub fn next_turn_prompt(template: &str, transcript: &Transcript) -> String {
    format!(
        "{template}\n\n\
         You are conducting a 45Q eligibility assessment. Based on the conversation so far and the 45Q documents, what should you ask next to determine eligibility?\n\n\
         Current conversation:\n{conversation}\n\n\
         Please provide the next question you should ask, or if you have enough information, provide a complete eligibility assessment. Be conversational and ask specific follow-up questions based on what you've learned.",
        conversation = transcript.render(),
    )
}

/// Directive demanding a structured final report built from the transcript.
#[must_use]
pub fn final_assessment_prompt(kind: FinalAssessmentKind, transcript: &Transcript) -> String {
    let conversation = transcript.render();
    match kind {
        FinalAssessmentKind::Forced => format!(
            "{FORCED_HEAD}\n\nInformation provided:\n{conversation}\n\n{CLOSING}"
        ),
        FinalAssessmentKind::Manual => format!(
            "{MANUAL_HEAD}\n\nInformation provided so far:\n{conversation}\n\n{CLOSING}"
        ),
    }
}

const CLOSING: &str = "Give the complete assessment with credit forecasting in the exact format shown above:";

const FORCED_HEAD: &str = "STOP ASKING QUESTIONS. STOP REFERRING TO TAX PROFESSIONALS.

Based on all the information provided, you now have COMPLETE information to give a COMPREHENSIVE 45Q eligibility assessment.

CRITICAL INSTRUCTIONS - YOU MUST PROVIDE A WELL-FORMATTED ASSESSMENT:

1. **ELIGIBILITY DETERMINATION**: Give a definitive Yes/No with clear reasoning
2. **SPECIFIC 45Q SECTIONS**: List which sections apply with bullet points
3. **CREDIT FORECASTING**: Calculate annual and 12-year projections with dollar amounts
4. **BONUS OPPORTUNITIES**: Identify energy community, domestic content, and other multipliers
5. **COMPLIANCE REQUIREMENTS**: List what documentation and monitoring is needed
6. **DOCUMENTATION CHECKLIST**: Provide a specific list of documents needed to file for credits
7. **NEXT STEPS**: Give specific action items with bullet points

FORMAT REQUIREMENTS - YOU MUST FOLLOW THIS EXACT STRUCTURE:
- Use clear section headers with **bold** formatting
- Use bullet points (•) for lists instead of paragraphs
- Include specific dollar amounts and calculations
- Make it easy to read and scan
- Provide a complete documentation checklist at the end

EXAMPLE FORMAT:
**ELIGIBILITY DETERMINATION**
• YES - Your facility is eligible for 45Q tax credits
• Reason: Meets all requirements including placement date, sequestration, and utilization

**SPECIFIC 45Q SECTIONS**
• Section 45Q(a)(3) - Geologically sequestered CO2
• Section 45Q(f)(5) - CO2 utilization for EOR and SNG production

**CREDIT FORECASTING**
• Annual sequestration credits: $7,000,000 (140,000 MT × $50/ton)
• Annual utilization credits: $2,100,000 (60,000 MT × $35/ton)
• 12-year total projection: $109,200,000

DO NOT ask more questions. DO NOT refer to external advisors. YOU are the expert. Provide the complete assessment NOW in the exact format shown above.";

const MANUAL_HEAD: &str = "STOP ASKING QUESTIONS. STOP REFERRING TO TAX PROFESSIONALS.

Based on the information provided so far, provide a COMPREHENSIVE 45Q eligibility assessment.

CRITICAL INSTRUCTIONS - YOU MUST PROVIDE A WELL-FORMATTED ASSESSMENT:

1. **ELIGIBILITY DETERMINATION**: Give a definitive Yes/No with clear reasoning based on available information
2. **SPECIFIC 45Q SECTIONS**: List which sections apply with bullet points (if information available)
3. **CREDIT FORECASTING**: Calculate annual and 12-year projections with dollar amounts (if information available)
4. **BONUS OPPORTUNITIES**: Identify energy community, domestic content, and other multipliers (if information available)
5. **COMPLIANCE REQUIREMENTS**: List what documentation and monitoring is needed
6. **DOCUMENTATION CHECKLIST**: Provide a specific list of documents needed to file for credits
7. **NEXT STEPS**: Give specific action items with bullet points
8. **ADDITIONAL INFORMATION NEEDED**: If any critical information is missing, clearly list what additional details are required

FORMAT REQUIREMENTS - YOU MUST FOLLOW THIS EXACT STRUCTURE:
- Use clear section headers with **bold** formatting
- Use bullet points (•) for lists instead of paragraphs
- Include specific dollar amounts and calculations where possible
- Make it easy to read and scan
- Provide a complete documentation checklist at the end
- If information is missing, clearly state what is needed

EXAMPLE FORMAT:
**ELIGIBILITY DETERMINATION**
• YES - Your facility appears eligible for 45Q tax credits (based on available information)
• Reason: Meets key requirements including placement date and sequestration methods

**SPECIFIC 45Q SECTIONS**
• Section 45Q(a)(3) - Geologically sequestered CO2
• Section 45Q(f)(5) - CO2 utilization for EOR and SNG production

**CREDIT FORECASTING**
• Annual sequestration credits: $7,000,000 (140,000 MT × $50/ton)
• Annual utilization credits: $2,100,000 (60,000 MT × $35/ton)
• 12-year total projection: $109,200,000

**ADDITIONAL INFORMATION NEEDED**
• [List any missing critical information]

DO NOT ask more questions. DO NOT refer to external advisors. YOU are the expert. Provide the complete assessment NOW in the exact format shown above.";

#[cfg(test)]
mod tests {
    use super::*;
    use credit_core::model::ChatTurn;

    fn transcript() -> Transcript {
        let mut transcript = Transcript::opened_with(OPENING_QUESTION);
        transcript.push(ChatTurn::user("A cement plant in Texas."));
        transcript
    }

    #[test]
    fn next_turn_embeds_template_and_conversation() {
        let prompt = next_turn_prompt("TEMPLATE", &transcript());
        assert!(prompt.starts_with("TEMPLATE\n\nYou are conducting a 45Q eligibility assessment."));
        assert!(prompt.contains("Current conversation:\nassistant: I'm helping you"));
        assert!(prompt.contains("\nuser: A cement plant in Texas.\n\nPlease provide the next question"));
    }

    #[test]
    fn manual_variant_asks_for_missing_information() {
        let forced = final_assessment_prompt(FinalAssessmentKind::Forced, &transcript());
        let manual = final_assessment_prompt(FinalAssessmentKind::Manual, &transcript());

        assert!(forced.contains("Information provided:\nassistant:"));
        assert!(!forced.contains("ADDITIONAL INFORMATION NEEDED"));
        assert!(manual.contains("Information provided so far:\nassistant:"));
        assert!(manual.contains("8. **ADDITIONAL INFORMATION NEEDED**"));
        for prompt in [&forced, &manual] {
            assert!(prompt.ends_with(CLOSING));
            assert!(prompt.contains("user: A cement plant in Texas."));
        }
    }
}
