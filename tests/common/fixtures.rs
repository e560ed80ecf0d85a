use serde_json::{json, Value};

/// A report touching every section shape
pub fn sample_report() -> Value {
    json!({
        "data": {
            "Vehicle Details": {
                "Make": "Maruti Suzuki",
                "Model": "Swift VXI",
                "Registration Number": "KA01AB1234",
                "Odometer Reading": 45210,
                "Insured": true
            },
            "Accident Summary": {
                "Date of Accident": "2024-01-05",
                "Location": "HSR Layout, Bengaluru",
                "Description": "Rear-ended at a signal"
            },
            "Damage Analysis": {
                "Rear Bumper": {"Observation": "Cracked", "Recommendation": "Replace"},
                "Tail Lamp": {"Observation": "Broken lens", "Recommendation": "Replace"},
                "Boot Lid": {"Observation": "Dented"}
            },
            "Repair Cost Estimation (INR)": {
                "Total Repair Cost": 18500,
                "Rear Bumper": 9500,
                "Tail Lamp": 4000,
                "Boot Lid": 5000
            },
            "Market Valuation (INR)": {
                "Pre-Accident Value": 550000,
                "Post-Accident Value": 480000,
                "Market Quotes": [
                    {"Dealer": "City Motors", "Value": 540000},
                    {"Dealer": "Metro Cars", "Value": 555000}
                ]
            },
            "Stickers and Signs Observed": {"Fastag": true, "Press Sticker": false},
            "Previous Claims": [
                {"Claim No": "C-101", "Amount": 12000},
                {"Claim No": "C-102", "Insurer": "Acme General"}
            ],
            "Vehicle Consistency Check": {
                "Same Vehicle Detected": true,
                "Reason": "Number plates match across photos"
            }
        }
    })
}

/// Wrap section data in the `data` envelope
pub fn report(data: Value) -> Value {
    json!({ "data": data })
}
