//! Maintenance recommendations from risk factors and probability

pub const IMMEDIATE_INSPECTION: &str = "Schedule immediate vehicle inspection";
pub const ROUTINE_MAINTENANCE: &str = "Schedule routine maintenance within 2 weeks";
pub const GOOD_CONDITION: &str = "Vehicle is in good condition. Continue regular maintenance.";

/// Substring looked up in the risk factor messages, and the advice it adds.
///
/// Matching is case-sensitive against the message text. `vibration` is
/// lowercase because it matches inside "High vibration detected".
const KEYWORD_RECOMMENDATIONS: [(&str, &str); 7] = [
    ("Brake", "Inspect and replace brake pads if necessary"),
    ("Battery", "Test battery and charging system"),
    ("Tire", "Check and adjust tire pressure"),
    ("Engine", "Run engine diagnostics"),
    ("vibration", "Check wheel balance and alignment"),
    ("Transmission", "Check transmission fluid and consider service"),
    ("Suspension", "Inspect suspension components"),
];

/// Build the ordered recommendation list. Never empty.
pub fn generate_recommendations(risk_factors: &[String], probability: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if probability > 0.7 {
        recommendations.push(IMMEDIATE_INSPECTION.to_string());
    } else if probability > 0.4 {
        recommendations.push(ROUTINE_MAINTENANCE.to_string());
    }

    for (keyword, advice) in KEYWORD_RECOMMENDATIONS {
        if risk_factors.iter().any(|f| f.contains(keyword)) {
            recommendations.push(advice.to_string());
        }
    }

    if recommendations.is_empty() {
        recommendations.push(GOOD_CONDITION.to_string());
    }

    recommendations
}
