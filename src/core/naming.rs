/// Converts a snake_case field name to the remote schema's element name.
///
/// `ach_account_name` becomes `AchAccountName`; each word is capitalized and
/// the rest of the word lowercased, so `bill_to_ID` becomes `BillToId`. The
/// leading word keeps its inner capitals (`initialTerm` → `InitialTerm`).
/// Custom fields keep their `__c` suffix: `region__c` → `Region__c`.
pub fn zuora_camelize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("__c") {
        return format!("{}__c", zuora_camelize(stem));
    }

    let mut out = String::with_capacity(name.len());
    let mut words = name.split('_');

    if let Some(first) = words.next() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    for word in words {
        let mut chars = word.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }

    out
}
