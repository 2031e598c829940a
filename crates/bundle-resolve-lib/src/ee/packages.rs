//! Compiled-in system package tables.
//!
//! Each table lists the packages a JRE of that level adds over the previous one.

use super::ExecutionEnvironment;

const J2SE_1_3: &[&str] = &[
	"javax.accessibility",
	"javax.naming",
	"javax.naming.directory",
	"javax.naming.event",
	"javax.naming.ldap",
	"javax.naming.spi",
	"javax.rmi",
	"javax.rmi.CORBA",
	"javax.sound.midi",
	"javax.sound.midi.spi",
	"javax.sound.sampled",
	"javax.sound.sampled.spi",
	"javax.swing",
	"javax.swing.border",
	"javax.swing.colorchooser",
	"javax.swing.event",
	"javax.swing.filechooser",
	"javax.swing.plaf",
	"javax.swing.plaf.basic",
	"javax.swing.plaf.metal",
	"javax.swing.plaf.multi",
	"javax.swing.table",
	"javax.swing.text",
	"javax.swing.text.html",
	"javax.swing.text.html.parser",
	"javax.swing.text.rtf",
	"javax.swing.tree",
	"javax.swing.undo",
	"javax.transaction",
	"org.omg.CORBA",
	"org.omg.CORBA.DynAnyPackage",
	"org.omg.CORBA.ORBPackage",
	"org.omg.CORBA.portable",
	"org.omg.CORBA.TypeCodePackage",
	"org.omg.CosNaming",
	"org.omg.CosNaming.NamingContextPackage",
	"org.omg.SendingContext",
	"org.omg.stub.java.rmi",
];

const J2SE_1_4: &[&str] = &[
	"javax.crypto",
	"javax.crypto.interfaces",
	"javax.crypto.spec",
	"javax.imageio",
	"javax.imageio.event",
	"javax.imageio.metadata",
	"javax.imageio.plugins.jpeg",
	"javax.imageio.spi",
	"javax.imageio.stream",
	"javax.net",
	"javax.net.ssl",
	"javax.print",
	"javax.print.attribute",
	"javax.print.attribute.standard",
	"javax.print.event",
	"javax.security.auth",
	"javax.security.auth.callback",
	"javax.security.auth.kerberos",
	"javax.security.auth.login",
	"javax.security.auth.spi",
	"javax.security.auth.x500",
	"javax.security.cert",
	"javax.sql",
	"javax.transaction.xa",
	"javax.xml.parsers",
	"javax.xml.transform",
	"javax.xml.transform.dom",
	"javax.xml.transform.sax",
	"javax.xml.transform.stream",
	"org.ietf.jgss",
	"org.omg.CosNaming.NamingContextExtPackage",
	"org.omg.Dynamic",
	"org.omg.DynamicAny",
	"org.omg.DynamicAny.DynAnyFactoryPackage",
	"org.omg.DynamicAny.DynAnyPackage",
	"org.omg.IOP",
	"org.omg.IOP.CodecFactoryPackage",
	"org.omg.IOP.CodecPackage",
	"org.omg.Messaging",
	"org.omg.PortableInterceptor",
	"org.omg.PortableInterceptor.ORBInitInfoPackage",
	"org.omg.PortableServer",
	"org.omg.PortableServer.CurrentPackage",
	"org.omg.PortableServer.POAManagerPackage",
	"org.omg.PortableServer.POAPackage",
	"org.omg.PortableServer.portable",
	"org.omg.PortableServer.ServantLocatorPackage",
	"org.w3c.dom",
	"org.xml.sax",
	"org.xml.sax.ext",
	"org.xml.sax.helpers",
];

const J2SE_1_5: &[&str] = &[
	"javax.activity",
	"javax.imageio.plugins.bmp",
	"javax.management",
	"javax.management.loading",
	"javax.management.modelmbean",
	"javax.management.monitor",
	"javax.management.openmbean",
	"javax.management.relation",
	"javax.management.remote",
	"javax.management.remote.rmi",
	"javax.management.timer",
	"javax.rmi.ssl",
	"javax.security.sasl",
	"javax.sql.rowset",
	"javax.sql.rowset.serial",
	"javax.sql.rowset.spi",
	"javax.swing.plaf.synth",
	"javax.xml",
	"javax.xml.datatype",
	"javax.xml.namespace",
	"javax.xml.validation",
	"javax.xml.xpath",
	"org.w3c.dom.bootstrap",
	"org.w3c.dom.events",
	"org.w3c.dom.ls",
];

const JAVASE_1_6: &[&str] = &[
	"javax.activation",
	"javax.annotation",
	"javax.annotation.processing",
	"javax.jws",
	"javax.jws.soap",
	"javax.lang.model",
	"javax.lang.model.element",
	"javax.lang.model.type",
	"javax.lang.model.util",
	"javax.script",
	"javax.tools",
	"javax.xml.bind",
	"javax.xml.bind.annotation",
	"javax.xml.bind.annotation.adapters",
	"javax.xml.bind.attachment",
	"javax.xml.bind.helpers",
	"javax.xml.bind.util",
	"javax.xml.crypto",
	"javax.xml.crypto.dom",
	"javax.xml.crypto.dsig",
	"javax.xml.crypto.dsig.dom",
	"javax.xml.crypto.dsig.keyinfo",
	"javax.xml.crypto.dsig.spec",
	"javax.xml.soap",
	"javax.xml.stream",
	"javax.xml.stream.events",
	"javax.xml.stream.util",
	"javax.xml.transform.stax",
	"javax.xml.ws",
	"javax.xml.ws.handler",
	"javax.xml.ws.handler.soap",
	"javax.xml.ws.http",
	"javax.xml.ws.soap",
	"javax.xml.ws.spi",
];

const JAVASE_1_7: &[&str] = &[
	"javax.swing.plaf.nimbus",
	"javax.xml.ws.spi.http",
	"javax.xml.ws.wsaddressing",
];

const JAVASE_1_8: &[&str] = &[
	"javax.annotation.processing",
	"javax.script",
	"javax.xml.ws.spi.http",
];

pub(super) fn system_packages(ee: ExecutionEnvironment) -> Vec<&'static str> {
	use ExecutionEnvironment::*;
	let tables: &[&[&'static str]] = match ee {
		OsgiMinimum1_0 | OsgiMinimum1_1 | OsgiMinimum1_2 | Jre1_1 | J2se1_2 => &[],
		J2se1_3 => &[J2SE_1_3],
		J2se1_4 => &[J2SE_1_3, J2SE_1_4],
		J2se1_5 => &[J2SE_1_3, J2SE_1_4, J2SE_1_5],
		JavaSe1_6 => &[J2SE_1_3, J2SE_1_4, J2SE_1_5, JAVASE_1_6],
		JavaSe1_7 => &[J2SE_1_3, J2SE_1_4, J2SE_1_5, JAVASE_1_6, JAVASE_1_7],
		JavaSe1_8 => &[J2SE_1_3, J2SE_1_4, J2SE_1_5, JAVASE_1_6, JAVASE_1_7, JAVASE_1_8],
	};

	let mut packages = Vec::<&'static str>::new();
	for p in tables.iter().flat_map(|t| t.iter()) {
		/* later tables may repeat a package that gained new members */
		if !packages.contains(p) {
			packages.push(p);
		}
	}
	packages
}
