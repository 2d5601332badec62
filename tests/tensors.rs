use fnn::{
    MlErr,
    config::Scalar,
    tensor::{Matrix, Shape, Tensor},
    util::{multiply, product, product_i32},
};

#[test]
fn product_never_wraps() {
    let big = 1usize << (usize::BITS / 2);

    assert_eq!(product(&[big - 1, big - 1], "test").unwrap(), (big - 1) * (big - 1));
    assert!(matches!(
        product(&[big, big], "test"),
        Err(MlErr::Overflow { .. })
    ));
    assert!(matches!(
        multiply(big, big, "test"),
        Err(MlErr::Overflow { .. })
    ));
    assert!(matches!(
        product_i32(&[i32::MAX, 2, -1], "test"),
        Err(MlErr::InvalidArgument(_))
    ));
}

#[test]
fn matrix_is_row_major() {
    let (r, c) = (3, 5);
    let mut m = Matrix::zeros(r, c).unwrap();

    for i in 0..r {
        for j in 0..c {
            m.set(i, j, (i * c + j) as Scalar).unwrap();
        }
    }

    let expected: Vec<Scalar> = (0..r * c).map(|v| v as Scalar).collect();
    assert_eq!(m.as_slice(), expected.as_slice());
}

#[test]
fn reshape_is_metadata_only() {
    let mut t = Tensor::from_vec([2, 6], (0..12).map(|v| v as Scalar).collect()).unwrap();
    let buffer = t.as_slice().to_vec();

    t.reshape([3, 2, 2]).unwrap();
    assert_eq!(t.shape(), vec![3, 2, 2]);
    assert_eq!(t.as_slice(), buffer.as_slice());

    assert!(matches!(
        t.reshape([5, 2]),
        Err(MlErr::ShapeMismatch { .. })
    ));
    assert_eq!(t.shape(), vec![3, 2, 2]);
    assert_eq!(t.as_slice(), buffer.as_slice());

    let mut m = Matrix::from_vec(2, 3, buffer[..6].to_vec()).unwrap();
    assert!(m.reshape(3, 3).is_err());
    m.reshape(6, 1).unwrap();
    assert_eq!(m.shape(), Shape::new(6, 1));
    assert_eq!(m.as_slice(), &buffer[..6]);
}

#[test]
fn zero_size_tensors() {
    let mut t = Tensor::zeros([0, 5]).unwrap();

    assert_eq!(t.numel(), 0);
    t.zero_fill();
    assert_eq!(t.shape(), vec![0, 5]);
    t.reshape([5, 0]).unwrap();
    assert_eq!(t.shape(), vec![5, 0]);
}
