fn main() {
    multiversx_sc_meta_lib::cli_main::<operators_gov::AbiProvider>();
}
