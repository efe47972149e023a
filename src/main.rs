fn main() {
    typespec::cmd::run();
}
