use triangles::DemoKind;

fn main() {
    triangles_viewer::launch(DemoKind::Static)
}
