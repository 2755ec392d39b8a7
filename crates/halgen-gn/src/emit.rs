//! GN text fragments for a hardware `static_library` target.
//!
//! Each function returns a complete block, newline-terminated, so the
//! generator only ever appends whole lines to the output document.

use halgen_chips::Target;

use crate::plan::Declaration;

/// Library name used when the plan does not override it.
pub const DEFAULT_MODULE: &str = "hardware";

const LICENSE_HEADER: &str = "\
# Copyright (c) 2020-2021 Lockzhiner Electronics Co., Ltd.
# limitations under the License.
# Licensed under the Apache License, Version 2.0 (the \"License\");
# you may not use this file except in compliance with the License.
# You may obtain a copy of the License at
#
#     http://www.apache.org/licenses/LICENSE-2.0
#
# Unless required by applicable law or agreed to in writing, software
# distributed under the License is distributed on an \"AS IS\" BASIS,
# WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
# See the License for the specific language governing permissions and
#

";

/// License comment, the two board imports and the opening of the library.
pub fn header(target: &Target, module: &str) -> String {
    let mut out = String::from(LICENSE_HEADER);
    out.push_str("import(\"//drivers/adapter/khdf/liteos_m/hdf.gni\")\n");
    out.push_str(&format!(
        "import(\"//device/rockchip/{}/sdk_liteos/board.gni\")\n\n",
        target.chip
    ));
    out.push_str(&format!("static_library(\"{module}\") {{\n"));
    out
}

/// Include directories for `target`, in emission order.
///
/// CMSIS and BSP directories are named after the upper-cased chip, project
/// directories after the chip as given.
pub fn include_dirs(target: &Target) -> Vec<String> {
    let upper = target.chip_upper();
    vec![
        "./include".to_string(),
        "./lib/hal/inc".to_string(),
        format!("./lib/CMSIS/Device/{upper}/Include"),
        "./lib/CMSIS/Core/Include".to_string(),
        format!("./lib/bsp/{upper}"),
        format!("./project/{}/src", target.chip),
        "$adapter_path/include".to_string(),
        "$sdk_path/include".to_string(),
        "$kernel_path/kernel/arch/include".to_string(),
        "$hal_path/include".to_string(),
        "./lz_hardware/wifi/include".to_string(),
        "//third_party/musl/porting/liteos_m/kernel/include".to_string(),
    ]
}

/// The `include_dirs = [ ... ]` block.
pub fn include_block(target: &Target) -> String {
    list_block("include_dirs", "=", &include_dirs(target))
}

/// A `sources = [ ... ]` or `sources += [ ... ]` block. Empty lists are valid.
pub fn sources_block(declaration: Declaration, paths: &[String]) -> String {
    list_block("sources", declaration.operator(), paths)
}

/// Closing brace of the library declaration.
pub fn footer() -> &'static str {
    "}\n"
}

fn list_block(name: &str, operator: &str, entries: &[String]) -> String {
    let mut out = format!("  {name} {operator} [\n");
    for entry in entries {
        // Entries are written verbatim; GN escapes are not applied.
        out.push_str(&format!("    \"{entry}\",\n"));
    }
    out.push_str("  ]\n");
    out
}
