//! SystemVerilog rendering of resolved blocks.
//!
//! Rendering is a pure function of the final IR sequences: member order,
//! build order and exclusion order all follow insertion order recorded in
//! the tree, so two runs over the same tree produce identical bytes.

use ralgen_ir::{sv_hex, Block, Register};

/// Self-test resource keys for register-level exclusions.
const REG_EXCLUSION_KEYS: [&str; 2] = ["NO_REG_BIT_BASH_TEST", "NO_REG_ACCESS_TEST"];
/// Self-test resource keys for field-level exclusions.
const FIELD_EXCLUSION_KEYS: [&str; 2] = ["_NO_REG_BIT_BASH_TEST", "_NO_REG_ACCESS_TEST"];

/// Render the complete package file for one block.
pub(crate) fn render_package(block: &Block) -> String {
    let guard = format!("__{}_RGM_PKG_SV__", block.name.to_uppercase());
    let mut lines: Vec<String> = vec![
        format!("`ifndef {guard}"),
        format!("`define {guard}"),
        format!("package {}_rgm_pkg;", block.name),
        "\timport uvm_pkg::*;".to_string(),
        "\t`include \"uvm_macros.svh\"".to_string(),
    ];
    for sub in &block.sub_blocks {
        lines.push(format!("\timport {}_rgm_pkg::*;", sub.name));
    }
    for register in &block.registers {
        lines.push(String::new());
        register_class(register, &mut lines);
    }
    lines.push(String::new());
    block_class(block, &mut lines);
    lines.push("endpackage".to_string());
    lines.push("`endif".to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Whether the block's artifact needs the self-test exclusion routine.
pub(crate) fn has_exclusions(block: &Block) -> bool {
    let read_only_register = block.registers.iter().any(Register::is_read_only);
    let reserved_field = block
        .registers
        .iter()
        .any(|r| !r.is_read_only() && r.fields.iter().any(|f| f.is_reserved()));
    read_only_register || reserved_field
}

fn register_class(register: &Register, lines: &mut Vec<String>) {
    let name = &register.name;
    lines.push(format!("\tclass {name}_reg extends uvm_reg;"));
    lines.push(format!("\t\t`uvm_object_utils({name}_reg)"));

    let has_fields = !register.fields.is_empty();
    if has_fields {
        lines.push(String::new());
        for field in &register.fields {
            lines.push(format!("\t\trand uvm_reg_field {};", field.name));
        }
        lines.push(String::new());
        lines.push("\t\tcovergroup value_cg;".to_string());
        lines.push("\t\t\toption.per_instance = 1;".to_string());
        for field in &register.fields {
            lines.push(format!(
                "\t\t\t{0}: coverpoint {0}.value[{1}:{2}];",
                field.name, field.hi, field.lo
            ));
        }
        lines.push("\t\tendgroup".to_string());
    }

    lines.push(String::new());
    lines.push(format!("\t\tfunction new(string name = \"{name}_reg\");"));
    lines.push("\t\t\tsuper.new(name, 32, UVM_CVR_ALL);".to_string());
    if has_fields {
        lines.push("\t\t\tvoid'(set_coverage(UVM_CVR_FIELD_VALS));".to_string());
        lines.push("\t\t\tif (has_coverage(UVM_CVR_FIELD_VALS)) begin".to_string());
        lines.push("\t\t\t\tvalue_cg = new();".to_string());
        lines.push("\t\t\tend".to_string());
    }
    lines.push("\t\tendfunction".to_string());

    lines.push(String::new());
    lines.push("\t\tvirtual function void build();".to_string());
    for field in &register.fields {
        lines.push(format!(
            "\t\t\t{0} = uvm_reg_field::type_id::create(\"{0}\");",
            field.name
        ));
    }
    for field in &register.fields {
        lines.push(format!(
            "\t\t\t{}.configure(this, {}, {}, \"{}\", 0, {}, 1, 0, 0);",
            field.name,
            field.width(),
            field.lo,
            field.access,
            sv_hex(field.reset)
        ));
    }
    lines.push("\t\tendfunction".to_string());

    if has_fields {
        lines.push(String::new());
        lines.push(
            "\t\tfunction void sample(uvm_reg_data_t data, uvm_reg_data_t byte_en, bit is_read, uvm_reg_map map);"
                .to_string(),
        );
        lines.push("\t\t\tsuper.sample(data, byte_en, is_read, map);".to_string());
        lines.push("\t\t\tsample_values();".to_string());
        lines.push("\t\tendfunction".to_string());
        lines.push(String::new());
        lines.push("\t\tfunction void sample_values();".to_string());
        lines.push("\t\t\tsuper.sample_values();".to_string());
        lines.push("\t\t\tif (get_coverage(UVM_CVR_FIELD_VALS)) begin".to_string());
        lines.push("\t\t\t\tvalue_cg.sample();".to_string());
        lines.push("\t\t\tend".to_string());
        lines.push("\t\tendfunction".to_string());
    }

    lines.push("\tendclass".to_string());
}

fn block_class(block: &Block, lines: &mut Vec<String>) {
    let name = &block.name;
    lines.push(format!("\tclass {name}_rgm extends uvm_reg_block;"));
    lines.push(format!("\t\t`uvm_object_utils({name}_rgm)"));
    for register in &block.registers {
        lines.push(format!("\t\trand {0}_reg {0};", register.name));
    }
    for memory in &block.memories {
        lines.push(format!("\t\trand uvm_mem {};", memory.name));
    }
    for sub in &block.sub_blocks {
        lines.push(format!("\t\trand {0}_rgm {0};", sub.name));
    }
    lines.push("\t\tuvm_reg_map map;".to_string());

    lines.push(format!("\t\tfunction new(string name = \"{name}_rgm\");"));
    lines.push("\t\t\tsuper.new(name, UVM_NO_COVERAGE);".to_string());
    lines.push("\t\tendfunction".to_string());

    lines.push("\t\tvirtual function void build();".to_string());
    lines.push("\t\t\tmap = create_map(\"map\", 'h0, 4, UVM_LITTLE_ENDIAN);".to_string());
    for register in &block.registers {
        lines.push(format!(
            "\t\t\t{0} = {0}_reg::type_id::create(\"{0}\");",
            register.name
        ));
    }
    for register in &block.registers {
        lines.push(format!("\t\t\t{}.configure(this);", register.name));
    }
    for register in &block.registers {
        lines.push(format!("\t\t\t{}.build();", register.name));
    }
    for register in &block.registers {
        lines.push(format!(
            "\t\t\tmap.add_reg({}, {}, \"{}\");",
            register.name,
            sv_hex(register.address),
            register.access
        ));
    }
    for memory in &block.memories {
        lines.push(format!(
            "\t\t\t{0} = new(\"{0}\", {1}, {2});",
            memory.name,
            sv_hex(memory.size),
            memory.width_bits
        ));
    }
    for memory in &block.memories {
        lines.push(format!("\t\t\t{}.configure(this);", memory.name));
    }
    for memory in &block.memories {
        lines.push(format!(
            "\t\t\t{0}.add_hdl_path_slice(\"{0}\", {1}, {2});",
            memory.name,
            sv_hex(memory.offset),
            sv_hex(memory.size)
        ));
    }
    for memory in &block.memories {
        lines.push(format!(
            "\t\t\tmap.add_mem({}, {});",
            memory.name,
            sv_hex(memory.offset)
        ));
    }
    for sub in &block.sub_blocks {
        lines.push(format!(
            "\t\t\t{0} = {0}_rgm::type_id::create(\"{0}\");",
            sub.name
        ));
    }
    for sub in &block.sub_blocks {
        lines.push(format!("\t\t\t{}.configure(this);", sub.name));
    }
    for sub in &block.sub_blocks {
        lines.push(format!("\t\t\t{}.build();", sub.name));
    }
    for sub in &block.sub_blocks {
        lines.push(format!("\t\t\t{}.lock_model();", sub.name));
    }
    for sub in &block.sub_blocks {
        lines.push(format!(
            "\t\t\tmap.add_submap({}.map, {});",
            sub.name,
            sv_hex(sub.offset)
        ));
    }

    if !block.registers.is_empty() {
        lines.push("\t\t\t// TODO: add hdl path to access registers backdoor".to_string());
        for register in &block.registers {
            for field in register.fields.iter().filter(|f| !f.is_reserved()) {
                lines.push(format!(
                    "\t\t\t// {}.add_hdl_path_slice(\"{}\", {}, {});",
                    register.name,
                    field.name,
                    field.lo,
                    field.width()
                ));
            }
        }
    }
    if has_exclusions(block) {
        lines.push("\t\t\texclude_rg_fd_st();".to_string());
    }
    lines.push("\t\tendfunction".to_string());

    if has_exclusions(block) {
        lines.push("\t\tvirtual function void exclude_rg_fd_st();".to_string());
        lines.extend(exclusion_lines(block));
        lines.push("\t\tendfunction".to_string());
    }
    lines.push("\tendclass".to_string());
}

/// Self-test exclusion directives, register-level pairs before
/// field-level pairs, grouped by resource key.
fn exclusion_lines(block: &Block) -> Vec<String> {
    let mut lines = Vec::new();
    for key in REG_EXCLUSION_KEYS {
        for register in block.registers.iter().filter(|r| r.is_read_only()) {
            lines.push(format!(
                "\t\t\tuvm_resource_db#(bit)::set({{\"REG::\", {}.get_full_name()}}, \"{key}\", 1, this);",
                register.name
            ));
        }
    }
    for key in FIELD_EXCLUSION_KEYS {
        for register in block.registers.iter().filter(|r| !r.is_read_only()) {
            for field in register.fields.iter().filter(|f| f.is_reserved()) {
                lines.push(format!(
                    "\t\t\tuvm_resource_db#(bit)::set({{\"REG::\", {}.{}.get_full_name()}}, \"{key}\", 1, this);",
                    register.name, field.name
                ));
            }
        }
    }
    lines
}
