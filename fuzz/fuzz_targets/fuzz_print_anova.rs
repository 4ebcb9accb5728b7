// SPDX-License-Identifier: AGPL-3.0-or-later
#![no_main]

use libfuzzer_sys::fuzz_target;
use papaja_core::{print_anova, AnovaOptions, OutputFormat, RenderConfig, VarianceTable};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(table) = VarianceTable::from_json(input) else {
        return;
    };

    let options = AnovaOptions::new().with_es(["pes", "ges", "es"]);
    if let Ok(results) = print_anova(&table, &options) {
        assert_eq!(results.table.len(), results.full_result.len());
        for format in OutputFormat::ALL {
            let _ = results.table.render(format, &RenderConfig::default());
        }
    }
});
