// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Rendering lookup tables as C/C++ source.

Output is a single translation unit: one `static const char *` declaration
per resource holding the escaped content, a lookup structure over those
declarations, a `static` lookup primitive, and public accessors defined in
terms of that primitive. Two lookup structures are supported:

* `struct-array`: a sentinel-terminated array of `{key, data, size}` rows
  searched via binary search. Compiles as C or C++.
* `ordered-map`: a `std::map` keyed by resource name. Requires C++.

The table passed in is already sorted; rows are rendered in table order so
the emitted binary search observes the ordering it depends on.
*/

use crate::{
    error::{Error, Result},
    literal::LiteralBlock,
    table::LookupTable,
};

/// Indentation for continuation lines of literal declarations.
pub const LITERAL_INDENT: &str = "    ";

const DATA_SYMBOL_PREFIX: &str = "EMBEDRC_RESOURCE_";
const TABLE_SYMBOL: &str = "EMBEDRC_RESOURCES";
const COUNT_SYMBOL: &str = "EMBEDRC_RESOURCE_COUNT";

const BANNER: &str = "/* Generated by embedrc from a resource manifest. Do not edit. */";

const ENTRY_STRUCT: &str = r#"struct embedrc_entry
{
    const char *key;
    const char *data;
    size_t size;
};"#;

// The upper bound starts at the last real row. The sentinel row is not
// part of the search space; probing it would hand strcmp a NULL key.
const STRUCT_ARRAY_LOOKUP: &str = r#"static int embedrc_lookup(const char *key, const char **data, size_t *size)
{
    int low = 0;
    int high = EMBEDRC_RESOURCE_COUNT - 1;

    while (low <= high)
    {
        int mid = (low + high) / 2;
        int cmp = strcmp(key, EMBEDRC_RESOURCES[mid].key);

        if (cmp == 0)
        {
            *data = EMBEDRC_RESOURCES[mid].data;
            *size = EMBEDRC_RESOURCES[mid].size;
            return 1;
        }

        if (cmp < 0)
        {
            high = mid - 1;
        }
        else
        {
            low = mid + 1;
        }
    }

    return 0;
}"#;

const MAP_TYPEDEF: &str =
    "typedef std::map<std::string, std::pair<const char *, size_t>> embedrc_map;";

const ORDERED_MAP_LOOKUP: &str = r#"static int embedrc_lookup(const char *key, const char **data, size_t *size)
{
    embedrc_map::const_iterator it = EMBEDRC_RESOURCES.find(key);

    if (it == EMBEDRC_RESOURCES.end())
    {
        return 0;
    }

    *data = it->second.first;
    *size = it->second.second;
    return 1;
}"#;

const GET_ACCESSOR: &str = r#"#ifdef __cplusplus
extern "C" const char *embedrc_get(const char *key, size_t *size);
#endif

const char *embedrc_get(const char *key, size_t *size)
{
    const char *data;
    size_t found;

    if (!embedrc_lookup(key, &data, &found))
    {
        return NULL;
    }

    if (size != NULL)
    {
        *size = found;
    }

    return data;
}"#;

const CPP_WRAPPERS: &str = r#"std::string embedrc_string(const char *key)
{
    const char *data;
    size_t size;

    if (!embedrc_lookup(key, &data, &size))
    {
        return std::string();
    }

    return std::string(data, size);
}

std::vector<uint8_t> embedrc_bytes(const char *key)
{
    const char *data;
    size_t size;

    if (!embedrc_lookup(key, &data, &size))
    {
        return std::vector<uint8_t>();
    }

    const uint8_t *bytes = reinterpret_cast<const uint8_t *>(data);

    return std::vector<uint8_t>(bytes, bytes + size);
}

std::pair<const char *, size_t> embedrc_view(const char *key)
{
    const char *data;
    size_t size;

    if (!embedrc_lookup(key, &data, &size))
    {
        return std::pair<const char *, size_t>(NULL, 0);
    }

    return std::pair<const char *, size_t>(data, size);
}"#;

const HEADER_CPP_BODY: &str = r#"#ifndef EMBEDRC_RESOURCES_H_
#define EMBEDRC_RESOURCES_H_

#include <stddef.h>

#ifdef __cplusplus
#include <stdint.h>
#include <string>
#include <utility>
#include <vector>

extern std::string embedrc_string(const char *key);
extern std::vector<uint8_t> embedrc_bytes(const char *key);
extern std::pair<const char *, size_t> embedrc_view(const char *key);

extern "C" const char *embedrc_get(const char *key, size_t *size);
#else
extern const char *embedrc_get(const char *key, size_t *size);
#endif

#endif /* EMBEDRC_RESOURCES_H_ */"#;

const HEADER_C_BODY: &str = r#"#ifndef EMBEDRC_RESOURCES_H_
#define EMBEDRC_RESOURCES_H_

#include <stddef.h>

#ifdef __cplusplus
extern "C" {
#endif

extern const char *embedrc_get(const char *key, size_t *size);

#ifdef __cplusplus
}
#endif

#endif /* EMBEDRC_RESOURCES_H_ */"#;

/// Lookup structure emitted into generated source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputStyle {
    /// Sentinel-terminated array of entry structs, searched by binary
    /// search. Compiles as C or C++.
    StructArray,

    /// `std::map` keyed by resource name. Requires C++ output.
    OrderedMap,
}

impl OutputStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructArray => "struct-array",
            Self::OrderedMap => "ordered-map",
        }
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "struct-array" => Ok(Self::StructArray),
            "ordered-map" => Ok(Self::OrderedMap),
            _ => Err(Error::Unsupported(format!("unknown output style: {}", s))),
        }
    }
}

/// Controls the shape of emitted source.
#[derive(Clone, Debug)]
pub struct EmitOptions {
    /// Which lookup structure to emit.
    pub style: OutputStyle,

    /// Whether to emit the C++ convenience accessors. Disabling them
    /// yields a file compilable as plain C.
    pub cpp_wrappers: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            style: OutputStyle::StructArray,
            cpp_wrappers: true,
        }
    }
}

impl EmitOptions {
    /// Reject option combinations that cannot yield a coherent file.
    pub fn validate(&self) -> Result<()> {
        if self.style == OutputStyle::OrderedMap && !self.cpp_wrappers {
            return Err(Error::Unsupported(
                "ordered-map lookup requires C++ output".to_string(),
            ));
        }

        Ok(())
    }
}

fn data_symbol(index: usize) -> String {
    format!("{}{}", DATA_SYMBOL_PREFIX, index)
}

/// Escape a key for inclusion in a C string literal.
///
/// Only quote and backslash need escaping: manifest parsing rejects
/// control characters and the escaped content lives in separate literals.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());

    for c in key.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }

    out
}

fn render_includes(options: &EmitOptions) -> String {
    let mut lines = vec!["#include <stddef.h>"];

    if options.cpp_wrappers {
        lines.push("#include <stdint.h>");
    }

    if options.style == OutputStyle::StructArray {
        lines.push("#include <string.h>");
    }

    if options.cpp_wrappers {
        lines.push("");

        if options.style == OutputStyle::OrderedMap {
            lines.push("#include <map>");
        }

        lines.push("#include <string>");
        lines.push("#include <utility>");
        lines.push("#include <vector>");
    }

    lines.join("\n")
}

fn render_data_literal(index: usize, block: &LiteralBlock) -> String {
    format!(
        "static const char *{} =\n{};",
        data_symbol(index),
        block.render(LITERAL_INDENT)
    )
}

fn render_struct_array_table(table: &LookupTable) -> Vec<String> {
    let mut rows = format!("static const struct embedrc_entry {}[] = {{\n", TABLE_SYMBOL);

    for row in table.rows() {
        rows.push_str(&format!(
            "    {{\"{}\", {}, {}}},\n",
            escape_key(&row.key),
            data_symbol(row.index),
            row.byte_count
        ));
    }

    rows.push_str("    {NULL, NULL, 0},\n};");

    vec![
        ENTRY_STRUCT.to_string(),
        format!("#define {} {}", COUNT_SYMBOL, table.len()),
        rows,
        STRUCT_ARRAY_LOOKUP.to_string(),
    ]
}

fn render_ordered_map_table(table: &LookupTable) -> Vec<String> {
    let mut rows = format!("static const embedrc_map {} = {{\n", TABLE_SYMBOL);

    for row in table.rows() {
        rows.push_str(&format!(
            "    {{\"{}\", {{{}, {}}}}},\n",
            escape_key(&row.key),
            data_symbol(row.index),
            row.byte_count
        ));
    }

    rows.push_str("};");

    vec![
        format!("#define {} {}", COUNT_SYMBOL, table.len()),
        MAP_TYPEDEF.to_string(),
        rows,
        ORDERED_MAP_LOOKUP.to_string(),
    ]
}

/// Render a complete C/C++ source file for a lookup table.
pub fn render_source(table: &LookupTable, options: &EmitOptions) -> Result<String> {
    options.validate()?;

    let mut sections = vec![BANNER.to_string(), render_includes(options)];

    for (index, block) in table.blocks().iter().enumerate() {
        sections.push(render_data_literal(index, block));
    }

    match options.style {
        OutputStyle::StructArray => sections.extend(render_struct_array_table(table)),
        OutputStyle::OrderedMap => sections.extend(render_ordered_map_table(table)),
    }

    sections.push(GET_ACCESSOR.to_string());

    if options.cpp_wrappers {
        sections.push(CPP_WRAPPERS.to_string());
    }

    let mut source = sections.join("\n\n");
    source.push('\n');

    Ok(source)
}

/// Render a companion header declaring the public accessors.
///
/// The header does not depend on the table's content, only on which
/// accessors the source file defines.
pub fn render_header(options: &EmitOptions) -> String {
    let body = if options.cpp_wrappers {
        HEADER_CPP_BODY
    } else {
        HEADER_C_BODY
    };

    format!("{}\n\n{}\n", BANNER, body)
}
