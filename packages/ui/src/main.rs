fn main() {
    dropnav_ui::attach_when_loaded();
}
